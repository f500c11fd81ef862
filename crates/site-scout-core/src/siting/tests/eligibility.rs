use super::common::*;
use crate::siting::eligibility::{resolve, EligibilityConfig, EligibilityStatus};
use crate::siting::reference::{Designation, QualifiedArea, QualifiedAreaSet};
use crate::spatial::Coordinates;

#[test]
fn missing_coordinates_are_unknown_not_ineligible() {
    let areas = QualifiedAreaSet::new(vec![qualified_tract(
        "Tract 1",
        Designation::QualifiedCensusTract,
    )]);

    let result = resolve(None, &areas, &EligibilityConfig::default());

    assert_eq!(result.status, EligibilityStatus::CoordinatesUnavailable);
    assert_eq!(result.status.tag(), "coordinates-unavailable");
    assert_eq!(result.basis_boost_percent, 0);
    assert!(!result.qualified_census_tract);
    assert!(!result.difficult_development_area);
}

#[test]
fn boost_does_not_stack_across_designations() {
    let areas = QualifiedAreaSet::new(vec![
        qualified_tract("Tract 1", Designation::QualifiedCensusTract),
        qualified_tract("Austin-Round Rock DDA", Designation::DifficultDevelopmentArea),
    ]);

    let result = resolve(Some(ORIGIN), &areas, &EligibilityConfig::default());

    assert_eq!(result.status, EligibilityStatus::Resolved);
    assert!(result.qualified_census_tract);
    assert!(result.difficult_development_area);
    assert_eq!(result.matches.len(), 2);
    assert_eq!(result.basis_boost_percent, 30);
}

#[test]
fn point_on_polygon_edge_is_eligible() {
    let edge_tract = QualifiedArea {
        name: "Edge Tract".to_string(),
        designation: Designation::QualifiedCensusTract,
        exterior: vec![
            Coordinates::new(30.0, -97.1),
            Coordinates::new(30.0, -96.9),
            Coordinates::new(30.1, -96.9),
            Coordinates::new(30.1, -97.1),
        ],
        holes: Vec::new(),
    };
    let areas = QualifiedAreaSet::new(vec![edge_tract]);

    let result = resolve(Some(ORIGIN), &areas, &EligibilityConfig::default());

    assert!(result.qualified_census_tract);
    assert_eq!(result.basis_boost_percent, 30);
}

#[test]
fn outside_every_polygon_gets_no_boost() {
    let areas = QualifiedAreaSet::new(vec![qualified_tract(
        "Tract 1",
        Designation::QualifiedCensusTract,
    )]);

    let result = resolve(
        Some(Coordinates::new(31.0, -97.0)),
        &areas,
        &EligibilityConfig::default(),
    );

    assert_eq!(result.status, EligibilityStatus::Resolved);
    assert!(result.matches.is_empty());
    assert_eq!(result.basis_boost_percent, 0);
    assert_eq!(result.summary(), "not in a qualified area");
}

#[test]
fn malformed_polygon_is_skipped_and_reported() {
    let broken = QualifiedArea {
        name: "Broken Tract".to_string(),
        designation: Designation::DifficultDevelopmentArea,
        exterior: vec![ORIGIN, ORIGIN, ORIGIN],
        holes: Vec::new(),
    };
    let areas = QualifiedAreaSet::new(vec![
        broken,
        qualified_tract("Tract 1", Designation::QualifiedCensusTract),
    ]);

    let result = resolve(Some(ORIGIN), &areas, &EligibilityConfig::default());

    assert!(result.qualified_census_tract);
    assert!(!result.difficult_development_area);
    assert_eq!(result.skipped_areas, vec!["Broken Tract".to_string()]);
}

#[test]
fn out_of_range_coordinates_are_a_geometry_error() {
    let areas = QualifiedAreaSet::new(Vec::new());

    let result = resolve(
        Some(Coordinates::new(120.0, -97.0)),
        &areas,
        &EligibilityConfig::default(),
    );

    assert!(matches!(result.status, EligibilityStatus::GeometryError(_)));
    assert_eq!(result.status.tag(), "geometry-error");
    assert_eq!(result.basis_boost_percent, 0);
}
