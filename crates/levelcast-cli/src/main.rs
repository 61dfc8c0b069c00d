//! Levelcast CLI
//!
//! Forecasts the next level-up from a snapshot of subjects and assignments
//! and recommends how many vocabulary lessons to do per day.

mod config;
mod render;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use levelcast_core::{build_timing_table, Planner, ReferenceTime, Snapshot};
use tracing_subscriber::EnvFilter;

use crate::config::CliSettings;

/// Levelcast - level-up forecast and lesson planner
#[derive(Parser)]
#[command(name = "levelcast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Level-up forecast and daily vocabulary lesson planner")]
#[command(long_about = concat!(
    "Levelcast projects when each locked radical, kanji and vocabulary item passes,\n",
    "estimates the level-up and recommends vocabulary lessons per day.\n\n",
    "Logging goes to stderr; set RUST_LOG (e.g. debug) and LEVELCAST_LOG_FORMAT=json."
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast the level-up and recommend lessons per day
    Plan {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,
        /// Settings file (default: LEVELCAST_CONFIG or the platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Reference time (RFC 3339); its offset defines calendar days
        #[arg(long)]
        now: Option<String>,
        /// Plan for this level instead of the snapshot's user level
        #[arg(long)]
        level: Option<u32>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Use UTC calendar days instead of the local offset
        #[arg(long)]
        utc: bool,
    },

    /// Print seconds-to-passing per stage for each SRS system
    Timings {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Show the effective settings, or write the defaults
    Config {
        /// Write default settings to the settings file
        #[arg(long)]
        init: bool,
        /// Overwrite an existing settings file
        #[arg(long, requires = "init")]
        force: bool,
        /// Settings file (default: LEVELCAST_CONFIG or the platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Parse first so --help/--version don't emit log output
    let cli = Cli::parse();

    init_logging();

    match cli.command {
        Commands::Plan {
            snapshot,
            config,
            now,
            level,
            json,
            utc,
        } => run_plan(snapshot, config, now, level, json, utc),
        Commands::Timings { snapshot } => run_timings(snapshot),
        Commands::Config {
            init,
            force,
            config,
        } => run_config(init, force, config),
    }
}

/// Logging to stderr, stdout is for the report
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("LEVELCAST_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .with_ansi(false)
            .init();
    }
}

/// Capture the run's single reference time
fn reference_time(now: Option<String>, utc: bool) -> anyhow::Result<ReferenceTime> {
    let (instant, offset): (DateTime<Utc>, FixedOffset) = match now {
        Some(text) => {
            let parsed = DateTime::parse_from_rfc3339(&text)
                .with_context(|| format!("Invalid --now '{}', expected RFC 3339", text))?;
            (parsed.with_timezone(&Utc), *parsed.offset())
        }
        None => {
            let local = Local::now();
            (local.with_timezone(&Utc), local.offset().fix())
        }
    };
    Ok(if utc {
        ReferenceTime::utc(instant)
    } else {
        ReferenceTime::new(instant, offset)
    })
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    Snapshot::load(path).with_context(|| format!("Failed to load snapshot {}", path.display()))
}

/// Run plan command
fn run_plan(
    snapshot_path: PathBuf,
    config_path: Option<PathBuf>,
    now: Option<String>,
    level: Option<u32>,
    json: bool,
    utc: bool,
) -> anyhow::Result<()> {
    let clock = reference_time(now, utc)?;

    let settings_path = config::resolve_path(config_path)?;
    let settings = config::load(&settings_path)
        .with_context(|| format!("Failed to load settings {}", settings_path.display()))?;
    let snapshot = load_snapshot(&snapshot_path)?;
    tracing::debug!(
        subjects = snapshot.len(),
        systems = snapshot.srs_systems.len(),
        "Snapshot loaded"
    );

    let mut planner = Planner::new(snapshot, settings.planner.clone());
    if let Some(level) = level {
        planner = planner.with_level(level);
    }
    let report = planner.run(&clock);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report, &settings, &clock));
    }
    Ok(())
}

/// Run timings command
fn run_timings(snapshot_path: PathBuf) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&snapshot_path)?;
    let timings = build_timing_table(&snapshot.srs_systems);
    print!("{}", render::render_timings(&timings));
    Ok(())
}

/// Run config command
fn run_config(init: bool, force: bool, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config::resolve_path(config_path)?;

    if init {
        if path.exists() && !force {
            bail!(
                "Settings file {} already exists (use --force to overwrite)",
                path.display()
            );
        }
        config::save(&path, &CliSettings::default())
            .with_context(|| format!("Failed to write settings {}", path.display()))?;
        println!("{} {}", "Wrote default settings to".green(), path.display());
        return Ok(());
    }

    let settings = config::load(&path)
        .with_context(|| format!("Failed to load settings {}", path.display()))?;
    println!("{}", "=== Levelcast Settings ===".cyan().bold());
    println!();
    let status = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("{}: {}{}", "Path".white().bold(), path.display(), status.dimmed());
    println!();
    println!("{}", serde_json::to_string_pretty(&settings)?);
    for warning in settings.planner.warnings() {
        println!("{} {}", "Warning:".yellow().bold(), warning);
    }
    Ok(())
}
