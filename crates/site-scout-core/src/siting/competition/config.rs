use serde::{Deserialize, Serialize};

use super::RuleOutcome;
use crate::siting::domain::ProgramType;

/// How the proximity rule treats matches for one program track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityPolicy {
    pub outcome_on_match: RuleOutcome,
    /// Award years counted back from the cycle, inclusive. `None` means any prior award.
    pub lookback_years: Option<u16>,
}

/// Same-cycle rule for high-population counties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeCountyPolicy {
    pub counties: Vec<String>,
    pub radius_miles: f64,
    pub programs: Vec<ProgramType>,
    pub outcome_on_match: RuleOutcome,
}

/// Radii, windows and severities for the competing-project rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionConfig {
    pub proximity_radius_miles: f64,
    pub same_population_only: bool,
    pub bond: ProximityPolicy,
    pub competitive: ProximityPolicy,
    pub large_county: LargeCountyPolicy,
    /// Nearest matches retained as evidence per rule.
    pub evidence_cap: usize,
}

impl CompetitionConfig {
    pub fn proximity_policy(&self, program: ProgramType) -> &ProximityPolicy {
        match program {
            ProgramType::FourPercentBond => &self.bond,
            ProgramType::NinePercentCompetitive => &self.competitive,
        }
    }
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            proximity_radius_miles: 1.0,
            same_population_only: true,
            bond: ProximityPolicy {
                outcome_on_match: RuleOutcome::SoftRisk,
                lookback_years: Some(3),
            },
            competitive: ProximityPolicy {
                outcome_on_match: RuleOutcome::Fatal,
                lookback_years: None,
            },
            large_county: LargeCountyPolicy {
                counties: ["Harris", "Dallas", "Tarrant", "Bexar", "Travis"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                radius_miles: 2.0,
                programs: vec![ProgramType::NinePercentCompetitive],
                outcome_on_match: RuleOutcome::Fatal,
            },
            evidence_cap: 10,
        }
    }
}
