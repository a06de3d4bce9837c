//! Batch generation of U-plan documents from a directory of trajectories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use uplan_core::{load_waypoints, Geodesy, VolumeGenerator};
use uplan_envelope::{parse_trajectory_filename, UplanDocument};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub trajectory_dir: PathBuf,
    pub output_dir: PathBuf,
    /// File names inside `trajectory_dir`; empty means every `*.csv` there
    pub files: Vec<String>,
    /// Start time of the first written plan
    pub start: DateTime<Utc>,
    /// Offset between consecutive plans' start times
    pub spacing: Duration,
    pub stride: usize,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
}

/// Generate and write a plan for every trajectory. Per-file failures are
/// logged and counted; only output-directory and listing errors abort.
pub fn run_batch<G: Geodesy>(
    generator: &VolumeGenerator<G>,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    let files = if options.files.is_empty() {
        list_trajectories(&options.trajectory_dir)?
    } else {
        options.files.clone()
    };

    let mut summary = BatchSummary::default();
    // None once advancing by `spacing` has left the representable range
    let mut start = Some(options.start);

    for file_name in &files {
        let csv_path = options.trajectory_dir.join(file_name);
        if !csv_path.exists() {
            tracing::warn!(
                "Trajectory file not found, skipping: {}",
                csv_path.display()
            );
            summary.skipped += 1;
            continue;
        }

        let Some(plan_start) = start else {
            anyhow::bail!(
                "start time out of range after {} plans, spacing {}",
                summary.written.len(),
                options.spacing
            );
        };

        match write_plan(generator, &csv_path, file_name, plan_start, options) {
            Ok(path) => {
                tracing::info!("Saved Uplan: {}", path.display());
                summary.written.push(path);
                start = plan_start.checked_add_signed(options.spacing);
            }
            Err(err) => {
                tracing::error!(
                    "Failed to generate Uplan for {}: {:#}",
                    csv_path.display(),
                    err
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn write_plan<G: Geodesy>(
    generator: &VolumeGenerator<G>,
    csv_path: &Path,
    file_name: &str,
    start: DateTime<Utc>,
    options: &BatchOptions,
) -> Result<PathBuf> {
    let document = build_plan(generator, csv_path, file_name, start, options.stride)?;
    let output_path = options
        .output_dir
        .join(format!("Uplan_{}.json", document.idplan));

    let bytes = document.to_json_pretty()?;
    fs::write(&output_path, bytes)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    Ok(output_path)
}

/// Plan spacing from a whole number of seconds.
pub fn spacing_from_secs(secs: i64) -> Result<Duration> {
    Duration::try_seconds(secs).with_context(|| format!("spacing of {secs} s is out of range"))
}

/// Load, reduce and volumize one trajectory, then wrap it in a document.
pub fn build_plan<G: Geodesy>(
    generator: &VolumeGenerator<G>,
    csv_path: &Path,
    file_name: &str,
    start: DateTime<Utc>,
    stride: usize,
) -> Result<UplanDocument> {
    let info = parse_trajectory_filename(file_name);
    let performance = info.performance();
    tracing::info!("Processing: {}", info.file_name);
    tracing::info!(
        "ID: {}, category: {} -> {}, aircraft: {} -> {}, Vmax: {} m/s, MTOM: {} kg",
        info.flight_id,
        info.category,
        info.category_schema(),
        info.aircraft_code,
        info.aircraft_type_schema(),
        performance.v_max_mps,
        performance.mtom_kg
    );

    let waypoints = load_waypoints(csv_path)?;
    if waypoints.is_empty() {
        anyhow::bail!("no waypoints loaded from {}", csv_path.display());
    }

    let volumes = generator
        .generate_from_raw(&waypoints, stride, start)
        .with_context(|| format!("volume generation failed for {}", csv_path.display()))?;

    UplanDocument::new(&info, &waypoints, volumes, Utc::now())
        .with_context(|| format!("empty trajectory {}", csv_path.display()))
}

/// All `*.csv` file names in a directory, sorted.
pub fn list_trajectories(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to list trajectory directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv || !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            files.push(name.to_string());
        }
    }
    files.sort();
    Ok(files)
}
