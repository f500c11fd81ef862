use site_scout_core::ingest::{read_reference, read_sites, IngestError};
use site_scout_core::siting::{
    rank, DataStatus, EngineConfig, PopulationServed, ProgramType, RuleOutcome,
    SiteScoringEngine, Tier,
};

const CYCLE_YEAR: i32 = 2026;

fn engine() -> SiteScoringEngine {
    let data = include_bytes!("data/reference.json");
    let reference = read_reference(&data[..]).expect("reference bundle loads");
    SiteScoringEngine::new(EngineConfig::default(), reference).expect("default config validates")
}

#[test]
fn site_feed_parses_every_row() {
    let data = include_bytes!("data/sites.csv");
    let sites = read_sites(&data[..]).expect("site feed loads");

    assert_eq!(sites.len(), 3);
    assert_eq!(sites[0].program_type, ProgramType::NinePercentCompetitive);
    assert_eq!(sites[0].cost_multiplier, None);
    assert_eq!(sites[1].population_served, PopulationServed::General);
    assert_eq!(sites[2].program_type, ProgramType::FourPercentBond);
    assert_eq!(sites[2].population_served, PopulationServed::Senior);
    assert!(sites[2].coordinates.is_none());
}

#[test]
fn reference_bundle_excludes_malformed_tracts() {
    let engine = engine();
    let qualified = &engine.reference().qualified_areas;

    assert_eq!(qualified.len(), 2);
    assert_eq!(qualified.rejected().len(), 1);
    assert_eq!(qualified.rejected()[0].name, "Collapsed Tract");
}

#[test]
fn end_to_end_ranking_puts_the_viable_site_first() {
    let data = include_bytes!("data/sites.csv");
    let sites = read_sites(&data[..]).expect("site feed loads");
    let engine = engine();

    let results = engine
        .score_batch(&sites, CYCLE_YEAR)
        .expect("cycle year is valid");

    let viable = &results[0];
    assert_eq!(viable.eligibility.basis_boost_percent, 30);
    assert_eq!(viable.eligibility.matches.len(), 2);
    assert_eq!(
        viable.eligibility.skipped_areas,
        vec!["Collapsed Tract".to_string()]
    );
    assert_eq!(viable.competition_status(), RuleOutcome::Pass);
    assert_eq!(viable.anchor.score, 4);
    assert_eq!(viable.composite.points_total, 96);
    assert_eq!(viable.tier(), Tier::Tier2);
    assert_eq!(viable.recommendation, "Pursue: strong candidate");

    let crowded = &results[1];
    assert_eq!(crowded.competition_status(), RuleOutcome::Fatal);
    assert_eq!(crowded.anchor.score, 4);
    assert_eq!(crowded.tier(), Tier::Fatal);

    let unlocated = &results[2];
    assert_eq!(unlocated.data_status, DataStatus::CoordinatesUnavailable);
    assert_eq!(unlocated.tier(), Tier::Fatal);

    let ranked = rank(results);
    assert_eq!(ranked[0].result.site_id.0, "atx-001");
    assert!(ranked[1..].iter().all(|entry| entry.result.tier() == Tier::Fatal));

    let json = serde_json::to_value(&ranked).expect("ranked results serialize");
    assert_eq!(json[0]["rank"], 1);
    assert_eq!(json[0]["site_id"], "atx-001");
    assert_eq!(json[0]["composite"]["tier"], "Tier-2");
}

#[test]
fn unknown_category_fails_the_feed() {
    let csv = "id,latitude,longitude,county,program_type,rent_tier,flood_risk\n\
atx-009,30.27,-97.74,Travis,9%,strong,tsunami\n";

    let error = read_sites(csv.as_bytes()).expect_err("unknown flood risk rejected");

    match error {
        IngestError::InvalidField { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, "flood_risk");
        }
        other => panic!("expected invalid field, got {other:?}"),
    }
}
