//! Weighted point buckets, fatal overlay and tier assignment.

mod buckets;
mod config;
mod policy;

pub use config::{
    Band, BandTable, CompositeConfig, EnvironmentalRiskPoints, FloodRiskPoints, RentTierPoints,
    TierThresholds,
};
pub use policy::Tier;

pub(crate) use buckets::ResolvedCost;

use serde::{Deserialize, Serialize};

use super::anchor::AnchorScore;
use super::competition::{CompetitionAssessment, RuleOutcome};
use super::domain::Site;
use super::eligibility::GeoEligibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    BasisBoost,
    PovertyRate,
    AchievableRent,
    FloodRisk,
    EnvironmentalRisk,
    ConstructionCost,
}

impl Bucket {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BasisBoost => "basis boost",
            Self::PovertyRate => "poverty rate",
            Self::AchievableRent => "achievable rent",
            Self::FloodRisk => "flood risk",
            Self::EnvironmentalRisk => "environmental risk",
            Self::ConstructionCost => "construction cost",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScore {
    pub bucket: Bucket,
    pub points: u8,
    pub max_points: u8,
    /// Pre-band contribution; equal to `points` for categorical buckets.
    pub unbanded: f64,
    pub note: String,
}

impl BucketScore {
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} ({})",
            self.bucket.label(),
            self.points,
            self.max_points,
            self.note
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Sum of banded bucket points before any overlay.
    pub points_total: u16,
    pub max_points: u16,
    /// Sum of unbanded bucket contributions; orders sites with equal composite scores.
    pub raw_total: f64,
    /// `points_total` on a 0-100 scale, forced to zero under a fatal overlay.
    pub composite_score: f64,
    pub tier: Tier,
    pub fatal_flaws: Vec<String>,
    pub buckets: Vec<BucketScore>,
}

impl CompositeScore {
    pub fn fatal_flaw_count(&self) -> usize {
        self.fatal_flaws.len()
    }

    pub fn is_fatal(&self) -> bool {
        self.tier == Tier::Fatal
    }
}

pub(crate) struct CompositeInputs<'a> {
    pub(crate) site: &'a Site,
    pub(crate) eligibility: &'a GeoEligibility,
    pub(crate) competition: &'a CompetitionAssessment,
    pub(crate) anchor: &'a AnchorScore,
    pub(crate) cost: ResolvedCost<'a>,
}

pub(crate) fn compose(inputs: &CompositeInputs<'_>, config: &CompositeConfig) -> CompositeScore {
    let buckets = buckets::score_buckets(inputs.site, inputs.eligibility, &inputs.cost, config);
    let points_total: u16 = buckets.iter().map(|bucket| u16::from(bucket.points)).sum();
    let raw_total: f64 = buckets.iter().map(|bucket| bucket.unbanded).sum();
    let max_points = config.max_points();

    let mut fatal_flaws: Vec<String> = inputs
        .competition
        .checks
        .iter()
        .filter(|check| check.outcome == RuleOutcome::Fatal)
        .map(|check| format!("competition {}", check.summary()))
        .collect();
    if inputs.anchor.score == 0 {
        let reason = inputs
            .anchor
            .rationale
            .first()
            .map(String::as_str)
            .unwrap_or("anchor score is zero");
        fatal_flaws.push(format!("anchor: {reason}"));
    }

    // Fatal flaws are absolute; points never buy a site out of them.
    let (composite_score, tier) = if fatal_flaws.is_empty() {
        let scaled = if max_points == 0 {
            0.0
        } else {
            f64::from(points_total) * 100.0 / f64::from(max_points)
        };
        (scaled, Tier::from_score(scaled, &config.tiers))
    } else {
        (0.0, Tier::Fatal)
    };

    CompositeScore {
        points_total,
        max_points,
        raw_total,
        composite_score,
        tier,
        fatal_flaws,
        buckets,
    }
}

pub(crate) fn recommendation(score: &CompositeScore, competition: RuleOutcome) -> String {
    policy::recommend(score.tier, &score.fatal_flaws, competition)
}
