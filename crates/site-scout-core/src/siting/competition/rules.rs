use super::config::CompetitionConfig;
use super::{CheckState, CompetitionEvidence, CompetitionRule, RuleCheck, RuleOutcome};
use crate::siting::domain::{CompetingProject, Site};
use crate::siting::reference::normalize_county;
use crate::spatial::{distance_miles, Coordinates};

struct Nearby<'a> {
    project: &'a CompetingProject,
    distance_miles: f64,
}

/// Projects within `radius` of `origin` passing `keep`, nearest first.
///
/// Projects without usable coordinates are skipped; they can neither pass nor fail a rule.
fn nearby<'a>(
    origin: Coordinates,
    projects: &'a [CompetingProject],
    radius: f64,
    keep: impl Fn(&CompetingProject) -> bool,
) -> Vec<Nearby<'a>> {
    let mut found: Vec<Nearby<'a>> = projects
        .iter()
        .filter(|project| keep(*project))
        .filter_map(|project| {
            let location = project.coordinates?.checked().ok()?;
            let distance = distance_miles(origin, location);
            (distance <= radius).then_some(Nearby {
                project,
                distance_miles: distance,
            })
        })
        .collect();

    found.sort_by(|a, b| {
        a.distance_miles
            .total_cmp(&b.distance_miles)
            .then_with(|| a.project.name.cmp(&b.project.name))
            .then_with(|| b.project.award_year.cmp(&a.project.award_year))
    });
    found
}

fn evidence(found: &[Nearby<'_>], cap: usize) -> Vec<CompetitionEvidence> {
    found
        .iter()
        .take(cap)
        .map(|hit| CompetitionEvidence {
            project_name: hit.project.name.clone(),
            award_year: hit.project.award_year,
            units: hit.project.units,
            program_type: hit.project.program_type,
            population_served: hit.project.population_served,
            distance_miles: hit.distance_miles,
        })
        .collect()
}

fn unavailable(rule: CompetitionRule) -> RuleCheck {
    RuleCheck {
        rule,
        outcome: RuleOutcome::Pass,
        state: CheckState::CoordinatesUnavailable,
        nearest_distance_miles: None,
        match_count: 0,
        evidence: Vec::new(),
        detail: "site coordinates unavailable; rule not evaluated".to_string(),
    }
}

fn nearest_note(found: &[Nearby<'_>]) -> String {
    match found.first() {
        Some(hit) => format!(
            "; nearest {} ({}) at {:.2} mi",
            hit.project.name, hit.project.award_year, hit.distance_miles
        ),
        None => String::new(),
    }
}

pub(crate) fn proximity_window(
    site: &Site,
    origin: Option<Coordinates>,
    projects: &[CompetingProject],
    cycle_year: i32,
    config: &CompetitionConfig,
) -> RuleCheck {
    let rule = CompetitionRule::ProximityWindow;
    let Some(origin) = origin else {
        return unavailable(rule);
    };

    let policy = config.proximity_policy(site.program_type);
    let earliest = policy
        .lookback_years
        .map(|years| cycle_year.saturating_sub(i32::from(years)));
    let window = match earliest {
        Some(first) => format!("in {first}-{cycle_year}"),
        None => format!("at any time through {cycle_year}"),
    };

    let found = nearby(
        origin,
        projects,
        config.proximity_radius_miles,
        |project| {
            project.award_year <= cycle_year
                && earliest.map_or(true, |first| project.award_year >= first)
                && (!config.same_population_only
                    || project.population_served == site.population_served)
        },
    );

    let population = if config.same_population_only {
        site.population_served.label()
    } else {
        "competing"
    };
    let (outcome, detail) = if found.is_empty() {
        (
            RuleOutcome::Pass,
            format!(
                "no {population} projects within {:.1} mi awarded {window}",
                config.proximity_radius_miles
            ),
        )
    } else {
        (
            policy.outcome_on_match,
            format!(
                "{} {population} project(s) within {:.1} mi awarded {window}{}",
                found.len(),
                config.proximity_radius_miles,
                nearest_note(&found)
            ),
        )
    };

    RuleCheck {
        rule,
        outcome,
        state: CheckState::Evaluated,
        nearest_distance_miles: found.first().map(|hit| hit.distance_miles),
        match_count: found.len(),
        evidence: evidence(&found, config.evidence_cap),
        detail,
    }
}

pub(crate) fn large_county_same_cycle(
    site: &Site,
    origin: Option<Coordinates>,
    projects: &[CompetingProject],
    cycle_year: i32,
    config: &CompetitionConfig,
) -> RuleCheck {
    let rule = CompetitionRule::LargeCountySameCycle;
    let policy = &config.large_county;

    let county = normalize_county(&site.county);
    let large = policy
        .counties
        .iter()
        .any(|listed| normalize_county(listed) == county);
    if !large || !policy.programs.contains(&site.program_type) {
        let reason = if large {
            format!("{} sites are exempt", site.program_type.label())
        } else {
            format!("{} is not a large county", site.county.trim())
        };
        return RuleCheck {
            rule,
            outcome: RuleOutcome::Pass,
            state: CheckState::NotApplicable,
            nearest_distance_miles: None,
            match_count: 0,
            evidence: Vec::new(),
            detail: format!("not applicable: {reason}"),
        };
    }

    let Some(origin) = origin else {
        return unavailable(rule);
    };

    let found = nearby(origin, projects, policy.radius_miles, |project| {
        project.award_year == cycle_year
    });

    let (outcome, detail) = if found.is_empty() {
        (
            RuleOutcome::Pass,
            format!(
                "no {cycle_year} awards within {:.1} mi in large county {}",
                policy.radius_miles,
                site.county.trim()
            ),
        )
    } else {
        (
            policy.outcome_on_match,
            format!(
                "{} {cycle_year} award(s) within {:.1} mi in large county {}{}",
                found.len(),
                policy.radius_miles,
                site.county.trim(),
                nearest_note(&found)
            ),
        )
    };

    RuleCheck {
        rule,
        outcome,
        state: CheckState::Evaluated,
        nearest_distance_miles: found.first().map(|hit| hit.distance_miles),
        match_count: found.len(),
        evidence: evidence(&found, config.evidence_cap),
        detail,
    }
}
