use crate::siting::domain::{
    AnchorCategory, AnchorPoint, CompetingProject, EnvironmentalRisk, FloodRisk,
    PopulationServed, ProgramType, RentTier, Site, SiteId,
};
use crate::siting::reference::{
    Designation, IncorporatedArea, IncorporatedAreaSet, QualifiedArea, QualifiedAreaSet,
    ReferenceData,
};
use crate::siting::{EngineConfig, SiteScoringEngine};
use crate::spatial::Coordinates;

pub(super) const CYCLE_YEAR: i32 = 2026;
pub(super) const ORIGIN: Coordinates = Coordinates::new(30.0, -97.0);

/// Miles per degree of latitude on the haversine sphere.
const MILES_PER_DEGREE: f64 = 69.093;

pub(super) fn north_of(origin: Coordinates, miles: f64) -> Coordinates {
    Coordinates::new(origin.lat + miles / MILES_PER_DEGREE, origin.lon)
}

pub(super) fn square_around(center: Coordinates, half_side_degrees: f64) -> Vec<Coordinates> {
    let (lat, lon, d) = (center.lat, center.lon, half_side_degrees);
    vec![
        Coordinates::new(lat - d, lon - d),
        Coordinates::new(lat - d, lon + d),
        Coordinates::new(lat + d, lon + d),
        Coordinates::new(lat + d, lon - d),
    ]
}

pub(super) fn site(id: &str, program_type: ProgramType) -> Site {
    Site {
        id: SiteId(id.to_string()),
        coordinates: Some(ORIGIN),
        county: "Hays".to_string(),
        city: Some("Pleasantville".to_string()),
        acreage: Some(4.2),
        program_type,
        population_served: PopulationServed::General,
        poverty_rate: Some(8.0),
        rent_tier: RentTier::Strong,
        flood_risk: FloodRisk::Minimal,
        environmental_risk: EnvironmentalRisk::Clear,
        cost_multiplier: Some(1.0),
    }
}

pub(super) fn project(name: &str, miles: f64, award_year: i32) -> CompetingProject {
    CompetingProject {
        name: name.to_string(),
        coordinates: Some(north_of(ORIGIN, miles)),
        award_year,
        program_type: ProgramType::NinePercentCompetitive,
        units: 80,
        population_served: PopulationServed::General,
        county: "Hays".to_string(),
    }
}

pub(super) fn schools(count: usize, miles: f64) -> Vec<AnchorPoint> {
    (0..count)
        .map(|index| AnchorPoint {
            name: format!("School {}", index + 1),
            category: AnchorCategory::School,
            coordinates: Some(north_of(ORIGIN, miles)),
        })
        .collect()
}

pub(super) fn qualified_tract(name: &str, designation: Designation) -> QualifiedArea {
    QualifiedArea {
        name: name.to_string(),
        designation,
        exterior: square_around(ORIGIN, 0.05),
        holes: Vec::new(),
    }
}

pub(super) fn pleasantville() -> IncorporatedAreaSet {
    IncorporatedAreaSet::new(vec![IncorporatedArea {
        name: "Pleasantville".to_string(),
        exterior: square_around(ORIGIN, 0.2),
        holes: Vec::new(),
    }])
}

/// QCT around the origin, four schools nearby, inside Pleasantville, no competing awards.
pub(super) fn reference() -> ReferenceData {
    ReferenceData {
        qualified_areas: QualifiedAreaSet::new(vec![qualified_tract(
            "Tract 48209010100",
            Designation::QualifiedCensusTract,
        )]),
        incorporated_areas: pleasantville(),
        competing_projects: Vec::new(),
        anchors: schools(4, 1.0),
        ..ReferenceData::default()
    }
}

pub(super) fn engine(reference: ReferenceData) -> SiteScoringEngine {
    SiteScoringEngine::new(EngineConfig::default(), reference).expect("default config validates")
}
