pub mod commands;
pub mod error;
pub mod models;
pub mod settings;
pub mod stats;
pub mod utils;

use clap::Parser;

pub use error::{Result, StatsError};
pub use models::{Bucket, Dimension, SessionTally, Snapshot, TimelineEntry};
pub use settings::ReportSettings;

pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var); stderr keeps stdout clean for JSON
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let cli = commands::Cli::parse();
    let output = commands::execute(cli)?;
    println!("{output}");

    Ok(())
}
