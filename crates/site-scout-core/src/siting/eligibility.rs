use serde::{Deserialize, Serialize};

use super::reference::{Designation, QualifiedAreaSet};
use crate::spatial::Coordinates;

/// Basis boost granted for qualified-area membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    pub basis_boost_percent: u8,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            basis_boost_percent: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum EligibilityStatus {
    Resolved,
    /// Treated downstream as unknown, never as ineligible.
    CoordinatesUnavailable,
    GeometryError(String),
}

impl EligibilityStatus {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Resolved => "resolved",
            Self::CoordinatesUnavailable => "coordinates-unavailable",
            Self::GeometryError(_) => "geometry-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignationMatch {
    pub area_name: String,
    pub designation: Designation,
}

/// Qualified-area membership for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEligibility {
    pub status: EligibilityStatus,
    pub qualified_census_tract: bool,
    pub difficult_development_area: bool,
    pub state_designated: bool,
    pub basis_boost_percent: u8,
    pub matches: Vec<DesignationMatch>,
    /// Areas excluded from the test because their polygons failed validation.
    pub skipped_areas: Vec<String>,
}

impl GeoEligibility {
    fn empty(status: EligibilityStatus, skipped_areas: Vec<String>) -> Self {
        Self {
            status,
            qualified_census_tract: false,
            difficult_development_area: false,
            state_designated: false,
            basis_boost_percent: 0,
            matches: Vec::new(),
            skipped_areas,
        }
    }

    pub fn has_boost(&self) -> bool {
        self.basis_boost_percent > 0
    }

    pub fn summary(&self) -> String {
        match &self.status {
            EligibilityStatus::CoordinatesUnavailable => {
                "qualified-area membership unknown: coordinates unavailable".to_string()
            }
            EligibilityStatus::GeometryError(detail) => {
                format!("qualified-area membership unknown: {detail}")
            }
            EligibilityStatus::Resolved if self.matches.is_empty() => {
                "not in a qualified area".to_string()
            }
            EligibilityStatus::Resolved => {
                let mut labels: Vec<&str> = self
                    .matches
                    .iter()
                    .map(|found| found.designation.label())
                    .collect();
                labels.dedup();
                format!(
                    "{}% basis boost ({})",
                    self.basis_boost_percent,
                    labels.join(", ")
                )
            }
        }
    }
}

/// Resolve qualified-area membership; boundary points count as inside.
pub fn resolve(
    coordinates: Option<Coordinates>,
    areas: &QualifiedAreaSet,
    config: &EligibilityConfig,
) -> GeoEligibility {
    let skipped: Vec<String> = areas
        .rejected()
        .iter()
        .map(|rejected| rejected.name.clone())
        .collect();

    let Some(raw) = coordinates else {
        return GeoEligibility::empty(EligibilityStatus::CoordinatesUnavailable, skipped);
    };
    let point = match raw.checked() {
        Ok(point) => point,
        Err(err) => {
            return GeoEligibility::empty(EligibilityStatus::GeometryError(err.to_string()), skipped)
        }
    };

    let mut matches: Vec<DesignationMatch> = areas
        .areas()
        .iter()
        .filter(|area| area.boundary.contains_inclusive(point))
        .map(|area| DesignationMatch {
            area_name: area.name.clone(),
            designation: area.designation,
        })
        .collect();
    matches.sort_by(|a, b| {
        a.designation
            .cmp(&b.designation)
            .then_with(|| a.area_name.cmp(&b.area_name))
    });

    let has = |kind: Designation| matches.iter().any(|found| found.designation == kind);
    let qualified_census_tract = has(Designation::QualifiedCensusTract);
    let difficult_development_area = has(Designation::DifficultDevelopmentArea);
    let state_designated = has(Designation::StateDesignatedBasisBoost);

    // One flat boost however many designations match.
    let basis_boost_percent = if matches.is_empty() {
        0
    } else {
        config.basis_boost_percent
    };

    GeoEligibility {
        status: EligibilityStatus::Resolved,
        qualified_census_tract,
        difficult_development_area,
        state_designated,
        basis_boost_percent,
        matches,
        skipped_areas: skipped,
    }
}
