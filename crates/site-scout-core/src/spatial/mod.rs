//! Geometry primitives shared by the siting engine.
//!
//! Coordinates are WGS84 degrees. Distances are great-circle miles and
//! polygon containment is boundary-inclusive: a point on an edge or vertex
//! counts as inside.

use geo::{Area, Coord, HaversineDistance, Intersects, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

const METERS_PER_MILE: f64 = 1_609.344;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Reject non-finite or out-of-range values before they reach any math.
    pub fn checked(self) -> Result<Self, GeometryError> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            return Err(GeometryError::OutOfRange {
                lat: self.lat,
                lon: self.lon,
            });
        }
        Ok(self)
    }

    fn coord(self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// Great-circle distance in statute miles.
pub fn distance_miles(a: Coordinates, b: Coordinates) -> f64 {
    let from = Point::from(a.coord());
    let to = Point::from(b.coord());
    from.haversine_distance(&to) / METERS_PER_MILE
}

/// Closed or open ring of vertices; a repeated closing vertex is optional.
pub type Ring = Vec<Coordinates>;

/// A validated polygon with optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    polygon: Polygon<f64>,
}

impl Boundary {
    pub fn new(exterior: &[Coordinates], holes: &[Ring]) -> Result<Self, GeometryError> {
        let exterior = ring_to_line_string(exterior)?;
        let interiors = holes
            .iter()
            .map(|hole| ring_to_line_string(hole))
            .collect::<Result<Vec<_>, _>>()?;

        let polygon = Polygon::new(exterior, interiors);
        if polygon.unsigned_area() <= 0.0 {
            return Err(GeometryError::ZeroArea);
        }

        Ok(Self { polygon })
    }

    /// Containment test where edge and vertex points are inside.
    pub fn contains_inclusive(&self, point: Coordinates) -> bool {
        self.polygon.intersects(&point.coord())
    }
}

fn ring_to_line_string(ring: &[Coordinates]) -> Result<LineString<f64>, GeometryError> {
    if ring
        .iter()
        .any(|vertex| !vertex.lat.is_finite() || !vertex.lon.is_finite())
    {
        return Err(GeometryError::NonFinite);
    }

    let mut vertices: Vec<Coord<f64>> = ring.iter().map(|vertex| vertex.coord()).collect();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices.dedup();

    if vertices.len() < 3 {
        return Err(GeometryError::TooFewVertices(vertices.len()));
    }

    Ok(LineString::new(vertices))
}

/// Problems detected while validating coordinates or reference polygons.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("coordinate is not a finite number")]
    NonFinite,
    #[error("coordinate ({lat}, {lon}) is outside the valid latitude/longitude range")]
    OutOfRange { lat: f64, lon: f64 },
    #[error("ring has {0} distinct vertices, at least 3 required")]
    TooFewVertices(usize),
    #[error("polygon encloses zero area")]
    ZeroArea,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Coordinates> {
        vec![
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 1.0),
            Coordinates::new(1.0, 1.0),
            Coordinates::new(1.0, 0.0),
        ]
    }

    #[test]
    fn distance_between_identical_points_is_zero() {
        let point = Coordinates::new(32.7767, -96.797);
        assert!(distance_miles(point, point).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_69_miles() {
        let miles = distance_miles(Coordinates::new(30.0, -97.0), Coordinates::new(31.0, -97.0));
        assert!((miles - 69.1).abs() < 0.5, "got {miles}");
    }

    #[test]
    fn boundary_includes_edges_and_vertices() {
        let boundary = Boundary::new(&unit_square(), &[]).expect("valid square");

        assert!(boundary.contains_inclusive(Coordinates::new(0.5, 0.5)));
        assert!(boundary.contains_inclusive(Coordinates::new(0.0, 0.5)));
        assert!(boundary.contains_inclusive(Coordinates::new(1.0, 1.0)));
        assert!(!boundary.contains_inclusive(Coordinates::new(1.5, 0.5)));
    }

    #[test]
    fn points_inside_a_hole_are_outside() {
        let hole = vec![
            Coordinates::new(0.25, 0.25),
            Coordinates::new(0.25, 0.75),
            Coordinates::new(0.75, 0.75),
            Coordinates::new(0.75, 0.25),
        ];
        let boundary = Boundary::new(&unit_square(), &[hole]).expect("valid donut");

        assert!(!boundary.contains_inclusive(Coordinates::new(0.5, 0.5)));
        assert!(boundary.contains_inclusive(Coordinates::new(0.25, 0.5)));
        assert!(boundary.contains_inclusive(Coordinates::new(0.1, 0.1)));
    }

    #[test]
    fn degenerate_rings_are_rejected() {
        let line = vec![
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 1.0),
            Coordinates::new(0.0, 0.0),
        ];
        assert_eq!(
            Boundary::new(&line, &[]),
            Err(GeometryError::TooFewVertices(2))
        );

        let collinear = vec![
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 1.0),
            Coordinates::new(0.0, 2.0),
        ];
        assert_eq!(Boundary::new(&collinear, &[]), Err(GeometryError::ZeroArea));

        let mut broken = unit_square();
        broken[2].lat = f64::NAN;
        assert_eq!(Boundary::new(&broken, &[]), Err(GeometryError::NonFinite));
    }

    #[test]
    fn checked_rejects_out_of_range_coordinates() {
        assert!(Coordinates::new(45.0, -93.0).checked().is_ok());
        assert!(matches!(
            Coordinates::new(95.0, -93.0).checked(),
            Err(GeometryError::OutOfRange { .. })
        ));
        assert_eq!(
            Coordinates::new(f64::INFINITY, 0.0).checked(),
            Err(GeometryError::NonFinite)
        );
    }
}
