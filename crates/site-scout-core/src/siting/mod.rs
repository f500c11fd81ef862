//! Site eligibility and viability scoring.
//!
//! Each component is a pure function over one site and the shared, read-only
//! [`ReferenceData`]; [`SiteScoringEngine`] composes them and fans a batch out
//! across worker threads.

pub mod anchor;
pub mod competition;
pub mod composite;
mod config;
pub mod domain;
pub mod eligibility;
mod engine;
pub mod ranking;
pub mod reference;

#[cfg(test)]
mod tests;

pub use anchor::{AnchorConfig, AnchorScore};
pub use competition::{
    CheckState, CompetitionAssessment, CompetitionConfig, CompetitionEvidence, CompetitionRule,
    RuleCheck, RuleOutcome,
};
pub use composite::{Bucket, BucketScore, CompositeConfig, CompositeScore, Tier};
pub use config::{validate_cycle_year, EngineConfig, EARLIEST_CYCLE_YEAR};
pub use domain::{
    AnchorCategory, AnchorPoint, CompetingProject, EnvironmentalRisk, FloodRisk,
    PopulationServed, ProgramType, RentTier, Site, SiteId, UnknownCategory,
};
pub use eligibility::{EligibilityConfig, EligibilityStatus, GeoEligibility};
pub use engine::{DataStatus, ScoringResult, SiteScoringEngine};
pub use ranking::{rank, RankedSite};
pub use reference::{
    CostRegion, CostRegionTable, CountyCostRegion, Designation, IncorporatedArea,
    IncorporatedAreaSet, QualifiedArea, QualifiedAreaSet, ReferenceData,
};
