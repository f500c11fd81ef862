//! Immutable reference datasets shared by every site evaluation in a batch.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{AnchorPoint, CompetingProject};
use crate::spatial::{Boundary, Coordinates, GeometryError, Ring};

/// Kind of designation a qualified-area polygon carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Designation {
    QualifiedCensusTract,
    DifficultDevelopmentArea,
    StateDesignatedBasisBoost,
}

impl Designation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::QualifiedCensusTract => "Qualified Census Tract",
            Self::DifficultDevelopmentArea => "Difficult Development Area",
            Self::StateDesignatedBasisBoost => "State-designated basis boost area",
        }
    }
}

/// Polygon record as supplied by a loader, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedArea {
    pub name: String,
    pub designation: Designation,
    pub exterior: Ring,
    #[serde(default)]
    pub holes: Vec<Ring>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncorporatedArea {
    pub name: String,
    pub exterior: Ring,
    #[serde(default)]
    pub holes: Vec<Ring>,
}

/// Reference item excluded at load time because its geometry failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedArea {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub(crate) struct QualifiedBoundary {
    pub(crate) name: String,
    pub(crate) designation: Designation,
    pub(crate) boundary: Boundary,
}

/// Validated qualified-area polygons. Malformed polygons are logged and excluded.
#[derive(Debug, Clone, Default)]
pub struct QualifiedAreaSet {
    areas: Vec<QualifiedBoundary>,
    rejected: Vec<RejectedArea>,
}

impl QualifiedAreaSet {
    pub fn new(areas: Vec<QualifiedArea>) -> Self {
        let mut set = Self::default();
        for area in areas {
            match Boundary::new(&area.exterior, &area.holes) {
                Ok(boundary) => set.areas.push(QualifiedBoundary {
                    name: area.name,
                    designation: area.designation,
                    boundary,
                }),
                Err(err) => set.reject(area.name, err),
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn rejected(&self) -> &[RejectedArea] {
        &self.rejected
    }

    pub(crate) fn areas(&self) -> &[QualifiedBoundary] {
        &self.areas
    }

    fn reject(&mut self, name: String, err: GeometryError) {
        warn!(area = %name, error = %err, "excluding malformed qualified-area polygon");
        self.rejected.push(RejectedArea {
            name,
            reason: err.to_string(),
        });
    }
}

#[derive(Debug, Clone)]
struct PlaceBoundary {
    name: String,
    boundary: Boundary,
}

/// Municipal boundaries; the first containing place in input order wins.
#[derive(Debug, Clone, Default)]
pub struct IncorporatedAreaSet {
    places: Vec<PlaceBoundary>,
    rejected: Vec<RejectedArea>,
}

impl IncorporatedAreaSet {
    pub fn new(areas: Vec<IncorporatedArea>) -> Self {
        let mut set = Self::default();
        for area in areas {
            match Boundary::new(&area.exterior, &area.holes) {
                Ok(boundary) => set.places.push(PlaceBoundary {
                    name: area.name,
                    boundary,
                }),
                Err(err) => {
                    warn!(place = %area.name, error = %err, "excluding malformed incorporated-area polygon");
                    set.rejected.push(RejectedArea {
                        name: area.name,
                        reason: err.to_string(),
                    });
                }
            }
        }
        set
    }

    pub fn place_containing(&self, point: Coordinates) -> Option<&str> {
        self.places
            .iter()
            .find(|place| place.boundary.contains_inclusive(point))
            .map(|place| place.name.as_str())
    }

    pub fn rejected(&self) -> &[RejectedArea] {
        &self.rejected
    }
}

/// Construction-cost region assignment for one county.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRegion {
    pub region: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyCostRegion {
    pub county: String,
    #[serde(flatten)]
    pub region: CostRegion,
}

/// County to cost-region lookup with a single default region for unlisted counties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRegionTable {
    pub default_region: CostRegion,
    #[serde(default)]
    pub counties: Vec<CountyCostRegion>,
}

impl Default for CostRegionTable {
    fn default() -> Self {
        Self {
            default_region: CostRegion {
                region: "statewide".to_string(),
                multiplier: 1.0,
            },
            counties: Vec::new(),
        }
    }
}

impl CostRegionTable {
    pub fn region_for(&self, county: &str) -> &CostRegion {
        let wanted = normalize_county(county);
        self.counties
            .iter()
            .find(|entry| normalize_county(&entry.county) == wanted)
            .map(|entry| &entry.region)
            .unwrap_or(&self.default_region)
    }
}

/// Everything a batch run reads but never writes.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub qualified_areas: QualifiedAreaSet,
    pub incorporated_areas: IncorporatedAreaSet,
    pub competing_projects: Vec<CompetingProject>,
    pub anchors: Vec<AnchorPoint>,
    pub cost_regions: CostRegionTable,
}

/// Case-insensitive county key with any trailing "County"/"Parish" suffix dropped.
pub fn normalize_county(county: &str) -> String {
    let lowered = county.trim().to_ascii_lowercase();
    let stripped = lowered
        .strip_suffix(" county")
        .or_else(|| lowered.strip_suffix(" parish"))
        .unwrap_or(lowered.as_str());
    stripped.trim().to_string()
}
