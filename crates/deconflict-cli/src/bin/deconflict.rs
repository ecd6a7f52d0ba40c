//! Check a primary drone mission against scheduled traffic.
//!
//! Usage:
//!   cargo run -p deconflict-cli --bin deconflict -- --interactive
//!   cargo run -p deconflict-cli --bin deconflict -- --primary mission.json --schedule traffic.json
//!   cargo run -p deconflict-cli --bin deconflict -- --scenario crossing --coalesce

use anyhow::{bail, Context, Result};
use clap::Parser;
use deconflict_cli::input::prompt_mission;
use deconflict_cli::schedule::load_mission;
use deconflict_cli::{select, Config, OutputFormat, Report, ScenarioType, TrafficSource};
use deconflict_core::{validate_missions, ConflictDetector, ConflictGrouping, SeparationRules};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status when at least one conflict is found.
const EXIT_CONFLICT: u8 = 2;

/// Strategic deconfliction for planned drone missions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Primary mission JSON file (defaults to the first scheduled mission)
    #[arg(long, conflicts_with = "interactive")]
    primary: Option<PathBuf>,

    /// Enter the primary mission at the terminal
    #[arg(long)]
    interactive: bool,

    /// Schedule JSON file with the other missions (env: DECONFLICT_SCHEDULE)
    #[arg(long, conflicts_with = "scenario")]
    schedule: Option<PathBuf>,

    /// Built-in schedule (overrides DECONFLICT_SCHEDULE; default: demo)
    #[arg(long, value_enum)]
    scenario: Option<ScenarioType>,

    /// Minimum allowed separation (env: DECONFLICT_SAFETY_DISTANCE)
    #[arg(long)]
    safety_distance: Option<f64>,

    /// Sampling interval in seconds (env: DECONFLICT_TIME_STEP)
    #[arg(long)]
    time_step: Option<f64>,

    /// Merge consecutive violating samples into one conflict window
    #[arg(long)]
    coalesce: bool,

    /// Check every mission against every other instead of primary-vs-schedule
    #[arg(long)]
    all_pairs: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deconflict=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let grouping = if args.coalesce {
        ConflictGrouping::Runs
    } else {
        ConflictGrouping::PerSample
    };
    let rules = SeparationRules::new(
        args.safety_distance.unwrap_or(config.safety_distance),
        args.time_step.unwrap_or(config.time_step),
    )?
    .with_grouping(grouping);
    let detector = ConflictDetector::new(rules)?;

    let source = TrafficSource::resolve(args.schedule, args.scenario, &config);
    let traffic = source.load()?;

    let supplied = if args.interactive {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        println!("Enter details for the primary drone mission.");
        Some(prompt_mission(&mut stdin.lock(), &mut stdout)?)
    } else if let Some(path) = &args.primary {
        Some(load_mission(path)?)
    } else {
        None
    };

    let Some(selection) = select(&source, supplied, traffic) else {
        bail!("no primary mission given and the schedule is empty");
    };

    let primary = selection
        .primary
        .validate()
        .context("primary mission is invalid")?;
    let others = validate_missions(selection.traffic)
        .context("schedule contains an invalid mission")?;
    detector.check_sampling(std::iter::once(&primary).chain(&others))?;

    tracing::info!(
        "Checking {} against {} scheduled mission(s)",
        primary.id(),
        others.len()
    );

    let (conflicts, primary_id, missions_checked) = if args.all_pairs {
        let mut missions = Vec::with_capacity(others.len() + 1);
        missions.push(primary);
        missions.extend(others);
        let conflicts = detector.check_pairwise(&missions);
        (conflicts, None, missions.len())
    } else {
        let conflicts = detector.check_all(&primary, &others);
        (conflicts, Some(primary.id().clone()), others.len())
    };

    let report = Report::new(primary_id.as_ref(), rules, missions_checked, &conflicts);
    print!("{}", report.render(args.format)?);

    if conflicts.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_CONFLICT))
    }
}
