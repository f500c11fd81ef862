use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::spatial::Coordinates;

/// Identifier wrapper for candidate parcels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SiteId(pub String);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credit-allocation track; the two tracks apply competition rules with different strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramType {
    /// Non-competitive 4% credits paired with tax-exempt bonds.
    FourPercentBond,
    /// Competitive 9% allocation round.
    NinePercentCompetitive,
}

impl ProgramType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FourPercentBond => "4% bond",
            Self::NinePercentCompetitive => "9% competitive",
        }
    }
}

impl FromStr for ProgramType {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_token(value).as_str() {
            "4%" | "4% bond" | "4 percent" | "bond" | "four percent bond" => {
                Ok(Self::FourPercentBond)
            }
            "9%" | "9% competitive" | "9 percent" | "competitive" | "nine percent competitive" => {
                Ok(Self::NinePercentCompetitive)
            }
            _ => Err(UnknownCategory::new("program type", value)),
        }
    }
}

/// Tenancy a development is restricted to; proximity rules only compare like with like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PopulationServed {
    #[default]
    General,
    Senior,
    Supportive,
}

impl PopulationServed {
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Senior => "senior",
            Self::Supportive => "supportive",
        }
    }
}

impl FromStr for PopulationServed {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_token(value).as_str() {
            "" | "general" | "family" | "general occupancy" => Ok(Self::General),
            "senior" | "elderly" | "55+" | "62+" => Ok(Self::Senior),
            "supportive" | "psh" | "special needs" => Ok(Self::Supportive),
            _ => Err(UnknownCategory::new("population served", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentTier {
    Premium,
    Strong,
    Moderate,
    Weak,
}

impl RentTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

impl FromStr for RentTier {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_token(value).as_str() {
            "premium" | "1" | "a" => Ok(Self::Premium),
            "strong" | "2" | "b" => Ok(Self::Strong),
            "moderate" | "3" | "c" => Ok(Self::Moderate),
            "weak" | "4" | "d" => Ok(Self::Weak),
            _ => Err(UnknownCategory::new("rent tier", value)),
        }
    }
}

/// Flood hazard grouping derived from FEMA zone designations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FloodRisk {
    Minimal,
    Moderate,
    High,
    Severe,
    #[default]
    Unknown,
}

impl FloodRisk {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Severe => "severe",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for FloodRisk {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_token(value).as_str() {
            "minimal" | "low" | "x" | "zone x" => Ok(Self::Minimal),
            "moderate" | "x500" | "b" | "shaded x" => Ok(Self::Moderate),
            "high" | "a" | "ae" | "ah" | "ao" => Ok(Self::High),
            "severe" | "very high" | "v" | "ve" => Ok(Self::Severe),
            "" | "unknown" | "d" => Ok(Self::Unknown),
            _ => Err(UnknownCategory::new("flood risk", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalRisk {
    Clear,
    Low,
    Elevated,
    High,
    #[default]
    Unknown,
}

impl EnvironmentalRisk {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Low => "low",
            Self::Elevated => "elevated",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for EnvironmentalRisk {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_token(value).as_str() {
            "clear" | "none" => Ok(Self::Clear),
            "low" => Ok(Self::Low),
            "elevated" | "medium" | "moderate" => Ok(Self::Elevated),
            "high" | "severe" => Ok(Self::High),
            "" | "unknown" => Ok(Self::Unknown),
            _ => Err(UnknownCategory::new("environmental risk", value)),
        }
    }
}

/// Candidate parcel with the already-resolved attributes the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub coordinates: Option<Coordinates>,
    pub county: String,
    pub city: Option<String>,
    pub acreage: Option<f64>,
    pub program_type: ProgramType,
    #[serde(default)]
    pub population_served: PopulationServed,
    /// Share of tract population below the poverty line, in percent.
    pub poverty_rate: Option<f64>,
    pub rent_tier: RentTier,
    #[serde(default)]
    pub flood_risk: FloodRisk,
    #[serde(default)]
    pub environmental_risk: EnvironmentalRisk,
    /// Explicit regional construction-cost multiplier; the county table is used when absent.
    pub cost_multiplier: Option<f64>,
}

/// Previously awarded development considered by proximity rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetingProject {
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub award_year: i32,
    pub program_type: ProgramType,
    pub units: u32,
    #[serde(default)]
    pub population_served: PopulationServed,
    pub county: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorCategory {
    School,
    TransitStop,
    Grocery,
    Healthcare,
    Other,
}

/// Point of interest contributing to infrastructure sufficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub name: String,
    pub category: AnchorCategory,
    pub coordinates: Option<Coordinates>,
}

/// Raised when a free-text category cannot be mapped onto a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {field} '{value}'")]
pub struct UnknownCategory {
    pub field: &'static str,
    pub value: String,
}

impl UnknownCategory {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

fn normalize_token(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace(['-', '_'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_type_accepts_loader_spellings() {
        assert_eq!(
            "4% Bond".parse::<ProgramType>(),
            Ok(ProgramType::FourPercentBond)
        );
        assert_eq!(
            " competitive ".parse::<ProgramType>(),
            Ok(ProgramType::NinePercentCompetitive)
        );
        assert_eq!(
            "nine_percent_competitive".parse::<ProgramType>(),
            Ok(ProgramType::NinePercentCompetitive)
        );

        let err = "HOME".parse::<ProgramType>().expect_err("unknown program");
        assert_eq!(err.field, "program type");
        assert_eq!(err.value, "HOME");
    }

    #[test]
    fn flood_zones_map_to_risk_groups() {
        assert_eq!("AE".parse::<FloodRisk>(), Ok(FloodRisk::High));
        assert_eq!("zone x".parse::<FloodRisk>(), Ok(FloodRisk::Minimal));
        assert_eq!("".parse::<FloodRisk>(), Ok(FloodRisk::Unknown));
    }
}
