//! Generate U-plan documents for a batch of trajectory files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uplan_cli::{run_batch, spacing_from_secs, BatchOptions, Config};
use uplan_core::VolumeGenerator;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the trajectory CSVs
    #[arg(long, default_value = "setup/scenarios/Benidorm/BelowVLL/traj/")]
    traj_dir: PathBuf,

    /// Directory the U-plan JSON files are written to
    #[arg(long, default_value = "output/examples/")]
    output_dir: PathBuf,

    /// Start time of the first plan, UTC (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, default_value = "2025-09-01T09:00:00")]
    start_time: String,

    /// Seconds between consecutive plans' start times
    #[arg(long, default_value_t = 3600)]
    spacing_secs: i64,

    /// Reduction stride (overrides UPLAN_STRIDE)
    #[arg(long)]
    stride: Option<usize>,

    /// Trajectory file names; defaults to every CSV in the directory
    files: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uplan_core=info".parse()?)
                .add_directive("uplan_cli=info".parse()?)
                .add_directive("generate_uplans=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let start = NaiveDateTime::parse_from_str(&args.start_time, "%Y-%m-%dT%H:%M:%S")
        .with_context(|| format!("invalid start time {:?}", args.start_time))?
        .and_utc();

    tracing::info!("Generating Uplans");
    tracing::info!("Start time: {}", uplan_core::format_utc_secs(&start));
    tracing::debug!(?config, "Buffer configuration");

    let options = BatchOptions {
        trajectory_dir: args.traj_dir,
        output_dir: args.output_dir,
        files: args.files,
        start,
        spacing: spacing_from_secs(args.spacing_secs)?,
        stride: args.stride.unwrap_or(config.stride),
    };

    let generator = VolumeGenerator::new(config.rules);
    let summary = run_batch(&generator, &options)?;

    tracing::info!(
        "Generation completed: {} written, {} skipped, {} failed",
        summary.written.len(),
        summary.skipped,
        summary.failed
    );
    tracing::info!("Check output folder: {}", options.output_dir.display());

    Ok(())
}
