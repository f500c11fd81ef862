//! Distance and award-year rules against previously awarded developments.

mod config;
mod rules;

pub use config::{CompetitionConfig, LargeCountyPolicy, ProximityPolicy};

use serde::{Deserialize, Serialize};

use super::domain::{CompetingProject, PopulationServed, ProgramType, Site};
use crate::spatial::Coordinates;

/// Result of one rule check, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOutcome {
    Pass,
    SoftRisk,
    Fatal,
}

impl RuleOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::SoftRisk => "SOFT-RISK",
            Self::Fatal => "FATAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionRule {
    ProximityWindow,
    LargeCountySameCycle,
}

impl CompetitionRule {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProximityWindow => "proximity-window",
            Self::LargeCountySameCycle => "large-county-same-cycle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Evaluated,
    NotApplicable,
    CoordinatesUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionEvidence {
    pub project_name: String,
    pub award_year: i32,
    pub units: u32,
    pub program_type: ProgramType,
    pub population_served: PopulationServed,
    pub distance_miles: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub rule: CompetitionRule,
    pub outcome: RuleOutcome,
    pub state: CheckState,
    pub nearest_distance_miles: Option<f64>,
    /// Total qualifying matches; `evidence` holds at most the configured cap.
    pub match_count: usize,
    pub evidence: Vec<CompetitionEvidence>,
    pub detail: String,
}

impl RuleCheck {
    pub fn summary(&self) -> String {
        format!(
            "{} {}: {}",
            self.rule.label(),
            self.outcome.label(),
            self.detail
        )
    }
}

/// Aggregate competition status and per-rule trail for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionAssessment {
    pub status: RuleOutcome,
    pub checks: Vec<RuleCheck>,
}

impl CompetitionAssessment {
    pub fn fatal_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|check| check.outcome == RuleOutcome::Fatal)
            .count()
    }

    pub fn check(&self, rule: CompetitionRule) -> Option<&RuleCheck> {
        self.checks.iter().find(|check| check.rule == rule)
    }
}

/// Evaluate every competition rule for `site`.
///
/// `location` is the site's validated position; `None` leaves each rule unevaluated
/// and passing, since missing data is never fatal by default here.
pub fn evaluate(
    site: &Site,
    location: Option<Coordinates>,
    projects: &[CompetingProject],
    cycle_year: i32,
    config: &CompetitionConfig,
) -> CompetitionAssessment {
    let checks = vec![
        rules::proximity_window(site, location, projects, cycle_year, config),
        rules::large_county_same_cycle(site, location, projects, cycle_year, config),
    ];

    let status = checks
        .iter()
        .map(|check| check.outcome)
        .max()
        .unwrap_or(RuleOutcome::Pass);

    CompetitionAssessment { status, checks }
}
