use super::config::CompositeConfig;
use super::{Bucket, BucketScore};
use crate::siting::domain::Site;
use crate::siting::eligibility::GeoEligibility;

/// Cost multiplier actually used for the site and where it came from.
pub(crate) struct ResolvedCost<'a> {
    pub(crate) multiplier: f64,
    pub(crate) region: Option<&'a str>,
}

pub(crate) fn score_buckets(
    site: &Site,
    eligibility: &GeoEligibility,
    cost: &ResolvedCost<'_>,
    config: &CompositeConfig,
) -> Vec<BucketScore> {
    vec![
        basis_boost(eligibility, config),
        poverty(site, config),
        rent(site, config),
        flood(site, config),
        environmental(site, config),
        construction_cost(cost, config),
    ]
}

fn categorical(bucket: Bucket, points: u8, max_points: u8, note: String) -> BucketScore {
    BucketScore {
        bucket,
        points,
        max_points,
        unbanded: f64::from(points),
        note,
    }
}

fn basis_boost(eligibility: &GeoEligibility, config: &CompositeConfig) -> BucketScore {
    let points = if eligibility.has_boost() {
        config.basis_boost_points
    } else {
        0
    };
    categorical(
        Bucket::BasisBoost,
        points,
        config.basis_boost_points,
        eligibility.summary(),
    )
}

fn poverty(site: &Site, config: &CompositeConfig) -> BucketScore {
    let max_points = config.poverty.max_points().max(config.poverty_missing_points);
    match site.poverty_rate.filter(|rate| rate.is_finite()) {
        Some(rate) => BucketScore {
            bucket: Bucket::PovertyRate,
            points: config.poverty.points(rate),
            max_points,
            unbanded: config.poverty.unbanded(rate),
            note: format!("poverty rate {rate:.1}%"),
        },
        None => categorical(
            Bucket::PovertyRate,
            config.poverty_missing_points,
            max_points,
            "poverty rate unavailable".to_string(),
        ),
    }
}

fn rent(site: &Site, config: &CompositeConfig) -> BucketScore {
    categorical(
        Bucket::AchievableRent,
        config.rent.points(site.rent_tier),
        config.rent.max_points(),
        format!("{} achievable-rent tier", site.rent_tier.label()),
    )
}

fn flood(site: &Site, config: &CompositeConfig) -> BucketScore {
    categorical(
        Bucket::FloodRisk,
        config.flood.points(site.flood_risk),
        config.flood.max_points(),
        format!("{} flood risk", site.flood_risk.label()),
    )
}

fn environmental(site: &Site, config: &CompositeConfig) -> BucketScore {
    categorical(
        Bucket::EnvironmentalRisk,
        config.environmental.points(site.environmental_risk),
        config.environmental.max_points(),
        format!("{} environmental risk", site.environmental_risk.label()),
    )
}

fn construction_cost(cost: &ResolvedCost<'_>, config: &CompositeConfig) -> BucketScore {
    let note = match cost.region {
        Some(region) => format!(
            "cost multiplier {:.2} ({region} region)",
            cost.multiplier
        ),
        None => format!("cost multiplier {:.2} (site-specific)", cost.multiplier),
    };
    BucketScore {
        bucket: Bucket::ConstructionCost,
        points: config.construction_cost.points(cost.multiplier),
        max_points: config.construction_cost.max_points(),
        unbanded: config.construction_cost.unbanded(cost.multiplier),
        note,
    }
}
