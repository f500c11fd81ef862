use crate::siting::{
    AnchorPoint, CompetingProject, CostRegionTable, IncorporatedArea, IncorporatedAreaSet,
    QualifiedArea, QualifiedAreaSet, ReferenceData,
};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::info;

use super::IngestError;

/// On-disk shape of the reference snapshot. Every section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceBundle {
    pub qualified_areas: Vec<QualifiedArea>,
    pub incorporated_areas: Vec<IncorporatedArea>,
    pub competing_projects: Vec<CompetingProject>,
    pub anchors: Vec<AnchorPoint>,
    pub cost_regions: CostRegionTable,
}

impl ReferenceBundle {
    /// Validates polygons; malformed ones are excluded rather than failing the load.
    pub fn into_reference(self) -> ReferenceData {
        let qualified_areas = QualifiedAreaSet::new(self.qualified_areas);
        let incorporated_areas = IncorporatedAreaSet::new(self.incorporated_areas);

        info!(
            qualified_areas = qualified_areas.len(),
            rejected_areas = qualified_areas.rejected().len(),
            rejected_places = incorporated_areas.rejected().len(),
            competing_projects = self.competing_projects.len(),
            anchors = self.anchors.len(),
            cost_regions = self.cost_regions.counties.len(),
            "loaded reference data"
        );

        ReferenceData {
            qualified_areas,
            incorporated_areas,
            competing_projects: self.competing_projects,
            anchors: self.anchors,
            cost_regions: self.cost_regions,
        }
    }
}

pub fn read_reference_path<P: AsRef<Path>>(path: P) -> Result<ReferenceData, IngestError> {
    let file = std::fs::File::open(path)?;
    read_reference(std::io::BufReader::new(file))
}

pub fn read_reference<R: Read>(reader: R) -> Result<ReferenceData, IngestError> {
    let bundle: ReferenceBundle = serde_json::from_reader(reader)?;
    Ok(bundle.into_reference())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siting::{AnchorCategory, PopulationServed, ProgramType};
    use std::io::Cursor;

    const BUNDLE: &str = r#"{
        "qualified_areas": [
            {
                "name": "Tract 48453001100",
                "designation": "qualified_census_tract",
                "exterior": [
                    {"lat": 30.0, "lon": -97.1},
                    {"lat": 30.0, "lon": -96.9},
                    {"lat": 30.2, "lon": -96.9},
                    {"lat": 30.2, "lon": -97.1}
                ]
            },
            {
                "name": "Sliver",
                "designation": "difficult_development_area",
                "exterior": [
                    {"lat": 30.0, "lon": -97.0},
                    {"lat": 30.1, "lon": -97.0}
                ]
            }
        ],
        "competing_projects": [
            {
                "name": "Mesa Verde Apartments",
                "coordinates": {"lat": 30.05, "lon": -97.0},
                "award_year": 2021,
                "program_type": "nine_percent_competitive",
                "units": 72,
                "county": "Travis"
            }
        ],
        "anchors": [
            {"name": "Lamar Elementary", "category": "school", "coordinates": {"lat": 30.06, "lon": -97.0}},
            {"name": "Unmapped Clinic", "category": "healthcare", "coordinates": null}
        ],
        "cost_regions": {
            "default_region": {"region": "statewide", "multiplier": 1.0},
            "counties": [{"county": "Travis", "region": "central metro", "multiplier": 1.12}]
        }
    }"#;

    #[test]
    fn bundle_loads_every_section() {
        let reference = read_reference(Cursor::new(BUNDLE)).expect("bundle parses");

        assert_eq!(reference.qualified_areas.len(), 1);
        assert_eq!(reference.qualified_areas.rejected()[0].name, "Sliver");

        let project = &reference.competing_projects[0];
        assert_eq!(project.program_type, ProgramType::NinePercentCompetitive);
        assert_eq!(project.population_served, PopulationServed::General);

        assert_eq!(reference.anchors.len(), 2);
        assert_eq!(reference.anchors[1].category, AnchorCategory::Healthcare);
        assert_eq!(reference.anchors[1].coordinates, None);

        let travis = reference.cost_regions.region_for("Travis County");
        assert_eq!(travis.region, "central metro");
        assert_eq!(travis.multiplier, 1.12);
    }

    #[test]
    fn empty_bundle_uses_defaults() {
        let reference = read_reference(Cursor::new("{}")).expect("empty bundle parses");

        assert!(reference.qualified_areas.is_empty());
        assert!(reference.competing_projects.is_empty());
        assert_eq!(reference.cost_regions.region_for("Hays").region, "statewide");
    }

    #[test]
    fn invalid_json_is_reported() {
        let error = read_reference(Cursor::new("{\"anchors\": 5}")).expect_err("bad bundle");
        assert!(matches!(error, IngestError::Json(_)));
    }
}
