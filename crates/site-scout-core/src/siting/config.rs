use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::anchor::{AnchorConfig, ANCHOR_SCALE_MAX};
use super::competition::{CompetitionConfig, RuleOutcome};
use super::composite::{BandTable, CompositeConfig};
use super::eligibility::EligibilityConfig;
use crate::config::ConfigError;

/// First year housing credits could be allocated.
pub const EARLIEST_CYCLE_YEAR: i32 = 1986;
const LATEST_CYCLE_YEAR: i32 = 2200;

/// Every rule constant the engine reads, overridable per jurisdiction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub eligibility: EligibilityConfig,
    pub competition: CompetitionConfig,
    pub anchor: AnchorConfig,
    pub composite: CompositeConfig,
}

impl EngineConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::EngineConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse JSON overrides; omitted sections keep their defaults.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        serde_json::from_reader(reader).map_err(|source| ConfigError::EngineConfigParse { source })
    }

    /// Reject settings that would make results meaningless before any site is scored.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.eligibility.basis_boost_percent > 100 {
            return Err(ConfigError::invalid(
                "eligibility.basis_boost_percent",
                "must be between 0 and 100",
            ));
        }

        let competition = &self.competition;
        positive_radius(
            "competition.proximity_radius_miles",
            competition.proximity_radius_miles,
        )?;
        positive_radius(
            "competition.large_county.radius_miles",
            competition.large_county.radius_miles,
        )?;
        if competition.evidence_cap == 0 {
            return Err(ConfigError::invalid(
                "competition.evidence_cap",
                "must retain at least one match",
            ));
        }
        if competition.large_county.outcome_on_match == RuleOutcome::Pass
            || competition.bond.outcome_on_match == RuleOutcome::Pass
            || competition.competitive.outcome_on_match == RuleOutcome::Pass
        {
            return Err(ConfigError::invalid(
                "competition.outcome_on_match",
                "a matching rule must be soft_risk or fatal",
            ));
        }

        let anchor = &self.anchor;
        positive_radius("anchor.school_radius_miles", anchor.school_radius_miles)?;
        positive_radius("anchor.market_radius_miles", anchor.market_radius_miles)?;
        if anchor.max_score == 0 || anchor.max_score > ANCHOR_SCALE_MAX {
            return Err(ConfigError::invalid(
                "anchor.max_score",
                format!("must be between 1 and {ANCHOR_SCALE_MAX}"),
            ));
        }
        if anchor.base_score == 0 || anchor.base_score > anchor.max_score {
            return Err(ConfigError::invalid(
                "anchor.base_score",
                "must be at least 1 and no greater than anchor.max_score",
            ));
        }
        if anchor.established_school_count == 0
            || anchor.major_center_school_count < anchor.established_school_count
        {
            return Err(ConfigError::invalid(
                "anchor.major_center_school_count",
                "school thresholds must be positive and non-decreasing",
            ));
        }

        let composite = &self.composite;
        band_table("composite.poverty", &composite.poverty)?;
        band_table("composite.construction_cost", &composite.construction_cost)?;
        if composite.max_points() == 0 {
            return Err(ConfigError::invalid(
                "composite",
                "bucket maxima must sum to more than zero",
            ));
        }
        if !composite.tiers.descending() {
            return Err(ConfigError::invalid(
                "composite.tiers",
                "thresholds must be finite and strictly descending",
            ));
        }

        Ok(())
    }
}

/// Cycle years before the credit existed or absurdly far ahead are configuration mistakes.
pub fn validate_cycle_year(year: i32) -> Result<i32, ConfigError> {
    if (EARLIEST_CYCLE_YEAR..=LATEST_CYCLE_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ConfigError::CycleYearOutOfRange(year))
    }
}

fn positive_radius(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("radius {value} must be positive")))
    }
}

fn band_table(field: &'static str, table: &BandTable) -> Result<(), ConfigError> {
    if table.bands.is_empty() {
        return Err(ConfigError::invalid(field, "needs at least one band"));
    }
    if !table.edges_ascending() {
        return Err(ConfigError::invalid(
            field,
            "band edges must be finite and strictly ascending",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn defaults_validate() {
        EngineConfig::default()
            .validate()
            .expect("default constants are consistent");
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let json = r#"{
            "competition": { "proximity_radius_miles": 0.5, "evidence_cap": 3 },
            "anchor": { "school_radius_miles": 3.0 }
        }"#;
        let config = EngineConfig::from_reader(Cursor::new(json)).expect("parses overrides");

        assert_eq!(config.competition.proximity_radius_miles, 0.5);
        assert_eq!(config.competition.evidence_cap, 3);
        assert_eq!(config.competition.large_county.radius_miles, 2.0);
        assert_eq!(config.anchor.school_radius_miles, 3.0);
        assert_eq!(config.anchor.market_radius_miles, 2.0);
        assert_eq!(config.eligibility.basis_boost_percent, 30);
        config.validate().expect("overrides validate");
    }

    #[test]
    fn zero_radius_fails_fast() {
        let mut config = EngineConfig::default();
        config.anchor.school_radius_miles = 0.0;
        match config.validate() {
            Err(ConfigError::InvalidSetting { field, .. }) => {
                assert_eq!(field, "anchor.school_radius_miles")
            }
            other => panic!("expected invalid setting, got {other:?}"),
        }
    }

    #[test]
    fn unsorted_bands_fail_fast() {
        let mut config = EngineConfig::default();
        config.composite.poverty.bands.swap(0, 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting {
                field: "composite.poverty",
                ..
            })
        ));
    }

    #[test]
    fn anchor_maximum_cannot_exceed_the_scale() {
        let mut config = EngineConfig::default();
        config.anchor.max_score = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting {
                field: "anchor.max_score",
                ..
            })
        ));

        config.anchor.max_score = 4;
        config.validate().expect("a lower ceiling is allowed");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_reader(Cursor::new("{ not json")).expect_err("invalid");
        assert!(matches!(err, ConfigError::EngineConfigParse { .. }));
    }

    #[test]
    fn cycle_year_range() {
        assert_eq!(validate_cycle_year(2026).ok(), Some(2026));
        assert!(matches!(
            validate_cycle_year(1970),
            Err(ConfigError::CycleYearOutOfRange(1970))
        ));
    }
}
