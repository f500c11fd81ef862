use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use site_scout_core::config::AppConfig;
use site_scout_core::error::AppError;
use site_scout_core::ingest::{read_reference_path, read_sites_path};
use site_scout_core::siting::{
    rank, validate_cycle_year, EngineConfig, RankedSite, SiteScoringEngine, Tier,
};
use site_scout_core::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "site-scout",
    about = "Score candidate tax-credit sites for eligibility and viability",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a site feed against a reference bundle and print the ranked results
    Score(ScoreArgs),
    /// Print the engine configuration as JSON so it can be copied and overridden
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// CSV feed of candidate sites
    #[arg(long)]
    sites: PathBuf,
    /// JSON reference bundle (qualified areas, places, awards, anchors, cost regions)
    #[arg(long)]
    reference: PathBuf,
    /// Engine config overrides (defaults to SITE_SCOUT_ENGINE_CONFIG, then built-in rules)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Allocation cycle to evaluate (defaults to SITE_SCOUT_CYCLE_YEAR, then the current year)
    #[arg(long)]
    cycle_year: Option<i32>,
    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Show the configuration after applying SITE_SCOUT_ENGINE_CONFIG instead of the defaults
    #[arg(long)]
    effective: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Summary,
}

#[derive(Debug, Serialize)]
struct ScoringReport {
    cycle_year: i32,
    site_count: usize,
    fatal_count: usize,
    sites: Vec<RankedSite>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Config(args) => run_config(args, &config),
    }
}

fn run_score(args: ScoreArgs, app: &AppConfig) -> Result<(), AppError> {
    let ScoreArgs {
        sites,
        reference,
        config,
        cycle_year,
        output,
        format,
    } = args;

    let engine_config = match config {
        Some(path) => {
            let config = EngineConfig::from_path(path)?;
            config.validate()?;
            config
        }
        None => app.scoring.engine_config()?,
    };
    let cycle_year = validate_cycle_year(resolve_cycle_year(
        cycle_year,
        app.scoring.cycle_year,
        Local::now().year(),
    ))?;

    let sites = read_sites_path(&sites)?;
    let reference = read_reference_path(&reference)?;
    let engine = SiteScoringEngine::new(engine_config, reference)?;

    let ranked = rank(engine.score_batch(&sites, cycle_year)?);
    let report = ScoringReport {
        cycle_year,
        site_count: ranked.len(),
        fatal_count: ranked
            .iter()
            .filter(|entry| entry.result.tier() == Tier::Fatal)
            .count(),
        sites: ranked,
    };

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Summary => render_summary(&report),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!(path = %path.display(), sites = report.site_count, "wrote scoring report");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn run_config(args: ConfigArgs, app: &AppConfig) -> Result<(), AppError> {
    let config = if args.effective {
        app.scoring.engine_config()?
    } else {
        EngineConfig::default()
    };
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Command line wins over the environment; the calendar year is the last resort.
fn resolve_cycle_year(flag: Option<i32>, configured: Option<i32>, current_year: i32) -> i32 {
    flag.or(configured).unwrap_or(current_year)
}

fn render_summary(report: &ScoringReport) -> String {
    let mut lines = vec![format!(
        "Site scoring report: cycle {}, {} site(s), {} fatal",
        report.cycle_year, report.site_count, report.fatal_count
    )];

    for entry in &report.sites {
        let result = &entry.result;
        lines.push(format!(
            "{}. {} | {} | composite {:.1} | competition {} | anchor {}",
            entry.rank,
            result.site_id,
            result.tier().label(),
            result.composite.composite_score,
            result.competition_status().label(),
            result.anchor.score
        ));
        lines.push(format!("   {}", result.recommendation));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_year_prefers_flag_then_environment() {
        assert_eq!(resolve_cycle_year(Some(2024), Some(2025), 2026), 2024);
        assert_eq!(resolve_cycle_year(None, Some(2025), 2026), 2025);
        assert_eq!(resolve_cycle_year(None, None, 2026), 2026);
    }

    #[test]
    fn score_command_parses_paths_and_format() {
        let cli = Cli::try_parse_from([
            "site-scout",
            "score",
            "--sites",
            "sites.csv",
            "--reference",
            "reference.json",
            "--cycle-year",
            "2025",
            "--format",
            "summary",
        ])
        .expect("arguments parse");

        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.sites, PathBuf::from("sites.csv"));
                assert_eq!(args.cycle_year, Some(2025));
                assert_eq!(args.format, OutputFormat::Summary);
                assert!(args.output.is_none());
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn score_command_requires_inputs() {
        assert!(Cli::try_parse_from(["site-scout", "score", "--sites", "sites.csv"]).is_err());
    }

    #[test]
    fn empty_report_summary_has_a_header_only() {
        let report = ScoringReport {
            cycle_year: 2026,
            site_count: 0,
            fatal_count: 0,
            sites: Vec::new(),
        };
        assert_eq!(
            render_summary(&report),
            "Site scoring report: cycle 2026, 0 site(s), 0 fatal"
        );
    }
}
