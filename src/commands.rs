//! Command-line adapter: owns file access and the clock, and hands plain
//! data to the stats core.

const ENABLE_LOGS: bool = true;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::models::Snapshot;
use crate::settings::ReportSettings;
use crate::stats::{preset_ranges, DateRange, ReportBuilder, RoundingPolicy};
use crate::{log_debug, log_info};

#[derive(Debug, Parser)]
#[command(name = "focus-stats", version, about = "Chart-ready views over focus statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the chart report for a snapshot JSON file
    Report {
        snapshot: PathBuf,
        /// Round the headline total up instead of down
        #[arg(long)]
        ceil: bool,
        /// Reorder buckets into display order before charting
        #[arg(long)]
        normalize: bool,
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// List the date-picker presets as query strings
    Presets {
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Resolve a picked range into the navigation query string
    Range {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

pub fn execute(cli: Cli) -> Result<String> {
    let today = || chrono::Local::now().date_naive();

    match cli.command {
        Command::Report {
            snapshot,
            ceil,
            normalize,
            settings,
        } => {
            let mut settings = match settings {
                Some(path) => ReportSettings::load(&path)?,
                None => ReportSettings::default(),
            };
            if ceil {
                settings.rounding = RoundingPolicy::Ceil;
            }
            report(&snapshot, &settings, normalize)
        }
        Command::Presets { today: pinned } => Ok(presets(pinned.unwrap_or_else(today))),
        Command::Range {
            start,
            end,
            today: pinned,
        } => range(start.as_deref(), end.as_deref(), pinned.unwrap_or_else(today)),
    }
}

pub fn report(path: &Path, settings: &ReportSettings, normalize: bool) -> Result<String> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
    let mut snapshot = Snapshot::from_json(&json)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
    if normalize {
        snapshot = snapshot.normalized();
    }

    log_info!(
        "Building report for {} .. {} ({} tags)",
        snapshot.start_time,
        snapshot.end_time,
        snapshot.tags.len()
    );

    let report = ReportBuilder::new()
        .thresholds(settings.thresholds)
        .rounding(settings.rounding)
        .build(&snapshot)
        .context("Failed to build chart report")?;

    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn presets(today: NaiveDate) -> String {
    log_debug!("Computing presets for {}", today);

    preset_ranges(today)
        .into_iter()
        .map(|(preset, range)| format!("{}\t{}", preset.name(), range.to_query()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn range(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> Result<String> {
    let range = DateRange::from_query(start, end, today).context("Failed to resolve date range")?;
    Ok(format!("{}\t{} days", range.to_query(), range.span_days()))
}
