use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::anchor::{self, AnchorScore};
use super::competition::{self, CompetitionAssessment, RuleOutcome};
use super::composite::{self, CompositeInputs, CompositeScore, ResolvedCost, Tier};
use super::config::{validate_cycle_year, EngineConfig};
use super::domain::{Site, SiteId};
use super::eligibility::{self, GeoEligibility};
use super::reference::ReferenceData;
use crate::config::ConfigError;
use crate::spatial::Coordinates;

/// Whether the site could be located at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum DataStatus {
    Complete,
    CoordinatesUnavailable,
    InvalidCoordinates(String),
}

/// Engine output for one site. Rescoring produces a new value; nothing patches an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub site_id: SiteId,
    pub cycle_year: i32,
    pub data_status: DataStatus,
    pub eligibility: GeoEligibility,
    pub competition: CompetitionAssessment,
    pub anchor: AnchorScore,
    pub composite: CompositeScore,
    pub recommendation: String,
    /// Human-readable trail explaining the tier, in evaluation order.
    pub rationale: Vec<String>,
}

impl ScoringResult {
    pub fn tier(&self) -> Tier {
        self.composite.tier
    }

    pub fn competition_status(&self) -> RuleOutcome {
        self.competition.status
    }

    pub fn fatal_flaw_count(&self) -> usize {
        self.composite.fatal_flaw_count()
    }
}

/// Stateless scorer over one immutable reference snapshot.
pub struct SiteScoringEngine {
    config: EngineConfig,
    reference: ReferenceData,
}

impl SiteScoringEngine {
    /// Validates the configuration once so per-site work never meets a bad constant.
    pub fn new(config: EngineConfig, reference: ReferenceData) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, reference })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn score_site(&self, site: &Site, cycle_year: i32) -> ScoringResult {
        let (data_status, location) = locate(site.coordinates);
        let reference = &self.reference;

        let eligibility = eligibility::resolve(
            site.coordinates,
            &reference.qualified_areas,
            &self.config.eligibility,
        );
        let competition = competition::evaluate(
            site,
            location,
            &reference.competing_projects,
            cycle_year,
            &self.config.competition,
        );
        let anchor = anchor::score(
            location,
            &reference.anchors,
            &reference.incorporated_areas,
            &reference.competing_projects,
            cycle_year,
            &self.config.anchor,
        );

        let cost = match site.cost_multiplier.filter(|value| value.is_finite()) {
            Some(multiplier) => ResolvedCost {
                multiplier,
                region: None,
            },
            None => {
                let region = reference.cost_regions.region_for(&site.county);
                ResolvedCost {
                    multiplier: region.multiplier,
                    region: Some(region.region.as_str()),
                }
            }
        };

        let composite = composite::compose(
            &CompositeInputs {
                site,
                eligibility: &eligibility,
                competition: &competition,
                anchor: &anchor,
                cost,
            },
            &self.config.composite,
        );
        let recommendation = composite::recommendation(&composite, competition.status);
        let rationale = rationale(
            &data_status,
            &eligibility,
            &competition,
            (&anchor, self.config.anchor.max_score),
            &composite,
        );

        debug!(
            site = %site.id,
            tier = composite.tier.label(),
            score = composite.composite_score,
            competition = competition.status.label(),
            anchor = anchor.score,
            "scored site"
        );

        ScoringResult {
            site_id: site.id.clone(),
            cycle_year,
            data_status,
            eligibility,
            competition,
            anchor,
            composite,
            recommendation,
            rationale,
        }
    }

    /// Score every site in parallel; results keep input order.
    pub fn score_batch(
        &self,
        sites: &[Site],
        cycle_year: i32,
    ) -> Result<Vec<ScoringResult>, ConfigError> {
        let cycle_year = validate_cycle_year(cycle_year)?;

        let results: Vec<ScoringResult> = sites
            .par_iter()
            .map(|site| self.score_site(site, cycle_year))
            .collect();

        let fatal = results
            .iter()
            .filter(|result| result.tier() == Tier::Fatal)
            .count();
        let unlocated = results
            .iter()
            .filter(|result| result.data_status != DataStatus::Complete)
            .count();
        info!(
            sites = results.len(),
            fatal,
            unlocated,
            cycle_year,
            "scored batch"
        );

        Ok(results)
    }
}

fn locate(coordinates: Option<Coordinates>) -> (DataStatus, Option<Coordinates>) {
    match coordinates.map(Coordinates::checked) {
        None => (DataStatus::CoordinatesUnavailable, None),
        Some(Ok(point)) => (DataStatus::Complete, Some(point)),
        Some(Err(err)) => (DataStatus::InvalidCoordinates(err.to_string()), None),
    }
}

fn rationale(
    data_status: &DataStatus,
    eligibility: &GeoEligibility,
    competition: &CompetitionAssessment,
    (anchor, anchor_max): (&AnchorScore, u8),
    composite: &CompositeScore,
) -> Vec<String> {
    let mut lines = Vec::new();

    match data_status {
        DataStatus::Complete => {}
        DataStatus::CoordinatesUnavailable => {
            lines.push("site could not be located: coordinates unavailable".to_string())
        }
        DataStatus::InvalidCoordinates(detail) => {
            lines.push(format!("site could not be located: {detail}"))
        }
    }

    lines.push(format!("eligibility: {}", eligibility.summary()));
    if !eligibility.skipped_areas.is_empty() {
        lines.push(format!(
            "eligibility: {} malformed area(s) excluded ({})",
            eligibility.skipped_areas.len(),
            eligibility.skipped_areas.join(", ")
        ));
    }

    lines.push(format!("competition: {}", competition.status.label()));
    lines.extend(
        competition
            .checks
            .iter()
            .map(|check| format!("competition: {}", check.summary())),
    );

    lines.push(format!("anchor score {}/{anchor_max}", anchor.score));
    lines.extend(anchor.rationale.iter().map(|line| format!("anchor: {line}")));

    lines.extend(composite.buckets.iter().map(|bucket| bucket.summary()));
    lines.push(format!(
        "points {}/{} (composite {:.1}) -> {}",
        composite.points_total,
        composite.max_points,
        composite.composite_score,
        composite.tier.label()
    ));

    lines
}
