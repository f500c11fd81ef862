//! Civic-infrastructure sufficiency on a 0-5 scale with a hard zero for isolated sites.

use serde::{Deserialize, Serialize};

use super::domain::{AnchorCategory, AnchorPoint, CompetingProject};
use super::reference::IncorporatedAreaSet;
use crate::spatial::{distance_miles, Coordinates};

/// Ceiling of the anchor scale; configured maxima may be lower, never higher.
pub const ANCHOR_SCALE_MAX: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub school_radius_miles: f64,
    pub market_radius_miles: f64,
    pub base_score: u8,
    pub established_school_count: usize,
    pub major_center_school_count: usize,
    pub established_bonus: u8,
    pub major_center_bonus: u8,
    pub incorporated_bonus: u8,
    pub market_validation_bonus: u8,
    pub max_score: u8,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            school_radius_miles: 2.5,
            market_radius_miles: 2.0,
            base_score: 2,
            established_school_count: 3,
            major_center_school_count: 5,
            established_bonus: 1,
            major_center_bonus: 1,
            incorporated_bonus: 1,
            market_validation_bonus: 1,
            max_score: 5,
        }
    }
}

/// Anchor score plus the rationale lines reports display verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorScore {
    pub score: u8,
    /// Set when the score was forced to zero: no school nearby, or no usable location.
    pub fatal: bool,
    pub school_count: usize,
    pub incorporated_place: Option<String>,
    pub market_project_count: usize,
    pub rationale: Vec<String>,
}

impl AnchorScore {
    fn fatal(school_count: usize, message: String) -> Self {
        Self {
            score: 0,
            fatal: true,
            school_count,
            incorporated_place: None,
            market_project_count: 0,
            rationale: vec![message],
        }
    }
}

/// Score the infrastructure around `location`.
///
/// Factors are evaluated in a fixed order (schools, incorporation, market validation)
/// and the rationale follows that order. Only awards made in or before `cycle_year`
/// validate the market.
pub fn score(
    location: Option<Coordinates>,
    anchors: &[AnchorPoint],
    places: &IncorporatedAreaSet,
    projects: &[CompetingProject],
    cycle_year: i32,
    config: &AnchorConfig,
) -> AnchorScore {
    let Some(origin) = location else {
        return AnchorScore::fatal(0, "coordinates unavailable".to_string());
    };

    let school_count = anchors
        .iter()
        .filter(|anchor| anchor.category == AnchorCategory::School)
        .filter(|anchor| within(origin, anchor.coordinates, config.school_radius_miles))
        .count();

    if school_count == 0 {
        return AnchorScore::fatal(
            0,
            format!(
                "no school within {:.1} mi (fatal isolation)",
                config.school_radius_miles
            ),
        );
    }

    let mut rationale = vec![format!(
        "{school_count} school(s) within {:.1} mi (base {})",
        config.school_radius_miles, config.base_score
    )];
    let mut total = u32::from(config.base_score);

    if school_count >= config.established_school_count {
        total += u32::from(config.established_bonus);
        rationale.push(format!(
            "+{} established community ({}+ schools)",
            config.established_bonus, config.established_school_count
        ));
    }
    if school_count >= config.major_center_school_count {
        total += u32::from(config.major_center_bonus);
        rationale.push(format!(
            "+{} major population center ({}+ schools)",
            config.major_center_bonus, config.major_center_school_count
        ));
    }

    let incorporated_place = places.place_containing(origin).map(str::to_string);
    match &incorporated_place {
        Some(place) => {
            total += u32::from(config.incorporated_bonus);
            rationale.push(format!(
                "+{} inside incorporated place {place}",
                config.incorporated_bonus
            ));
        }
        None => rationale.push("+0 unincorporated".to_string()),
    }

    let market_project_count = projects
        .iter()
        .filter(|project| project.award_year <= cycle_year)
        .filter(|project| within(origin, project.coordinates, config.market_radius_miles))
        .count();
    if market_project_count > 0 {
        total += u32::from(config.market_validation_bonus);
        rationale.push(format!(
            "+{} market validated ({market_project_count} prior project(s) within {:.1} mi)",
            config.market_validation_bonus, config.market_radius_miles
        ));
    } else {
        rationale.push(format!(
            "+0 no prior projects within {:.1} mi",
            config.market_radius_miles
        ));
    }

    let max = u32::from(config.max_score);
    if total > max {
        rationale.push(format!("capped at {max}"));
    }
    let score = total.min(max) as u8;

    AnchorScore {
        score,
        fatal: false,
        school_count,
        incorporated_place,
        market_project_count,
        rationale,
    }
}

fn within(origin: Coordinates, candidate: Option<Coordinates>, radius: f64) -> bool {
    candidate
        .and_then(|point| point.checked().ok())
        .map(|point| distance_miles(origin, point) <= radius)
        .unwrap_or(false)
}
