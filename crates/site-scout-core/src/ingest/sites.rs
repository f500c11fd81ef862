use crate::siting::{
    EnvironmentalRisk, FloodRisk, PopulationServed, ProgramType, RentTier, Site, SiteId,
    UnknownCategory,
};
use crate::spatial::Coordinates;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use super::IngestError;

#[derive(Debug, Deserialize)]
struct SiteRow {
    id: String,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    county: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(default)]
    acreage: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    program_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    population_served: Option<String>,
    #[serde(default)]
    poverty_rate: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rent_tier: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    flood_risk: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    environmental_risk: Option<String>,
    #[serde(default)]
    cost_multiplier: Option<f64>,
}

impl SiteRow {
    fn into_site(self, line: u64) -> Result<Site, IngestError> {
        let program_type = self
            .program_type
            .as_deref()
            .ok_or(IngestError::MissingField {
                line,
                column: "program_type",
            })
            .and_then(|value| parse_column::<ProgramType>(line, "program_type", value))?;
        let rent_tier = self
            .rent_tier
            .as_deref()
            .ok_or(IngestError::MissingField {
                line,
                column: "rent_tier",
            })
            .and_then(|value| parse_column::<RentTier>(line, "rent_tier", value))?;

        let population_served = optional_column::<PopulationServed>(
            line,
            "population_served",
            self.population_served.as_deref(),
        )?;
        let flood_risk =
            optional_column::<FloodRisk>(line, "flood_risk", self.flood_risk.as_deref())?;
        let environmental_risk = optional_column::<EnvironmentalRisk>(
            line,
            "environmental_risk",
            self.environmental_risk.as_deref(),
        )?;

        let coordinates = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        };

        Ok(Site {
            id: SiteId(self.id),
            coordinates,
            county: self.county.unwrap_or_default(),
            city: self.city,
            acreage: self.acreage,
            program_type,
            population_served,
            poverty_rate: self.poverty_rate,
            rent_tier,
            flood_risk,
            environmental_risk,
            cost_multiplier: self.cost_multiplier,
        })
    }
}

fn parse_column<T>(line: u64, column: &'static str, value: &str) -> Result<T, IngestError>
where
    T: FromStr<Err = UnknownCategory>,
{
    value.parse().map_err(|source| IngestError::InvalidField {
        line,
        column,
        source,
    })
}

fn optional_column<T>(
    line: u64,
    column: &'static str,
    value: Option<&str>,
) -> Result<T, IngestError>
where
    T: FromStr<Err = UnknownCategory> + Default,
{
    match value {
        Some(value) => parse_column(line, column, value),
        None => Ok(T::default()),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub fn read_sites_path<P: AsRef<Path>>(path: P) -> Result<Vec<Site>, IngestError> {
    let file = std::fs::File::open(path)?;
    read_sites(file)
}

/// Parse a site feed. Blank cells become `None`; an unrecognized category fails the whole feed.
pub fn read_sites<R: Read>(reader: R) -> Result<Vec<Site>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut sites = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: SiteRow = record.deserialize(Some(&headers))?;
        sites.push(row.into_site(line)?);
    }

    let unlocated = sites.iter().filter(|site| site.coordinates.is_none()).count();
    info!(sites = sites.len(), unlocated, "loaded site feed");
    Ok(sites)
}
