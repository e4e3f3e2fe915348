//! Extract command - scan an image tree and write the CSV summary

use crate::cli::error::HelpfulError;
use camtrap_scout::{
    timestamped_path, write_records, Clock, ExtractConfig, ScanStats, Scanner, SkippedFile,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for the extract command
#[derive(Debug)]
pub struct ExtractArgs {
    pub input_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
    pub json: bool,
}

/// Summary printed after a successful run
#[derive(Debug, Serialize)]
pub struct ExtractSummary {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub images: usize,
    pub skipped: Vec<SkippedFile>,
    pub stats: ScanStats,
}

/// Merge the optional config file with command-line overrides
pub fn resolve_config(args: &ExtractArgs) -> anyhow::Result<ExtractConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractConfig::load(path)
            .map_err(|e| HelpfulError::invalid_config(path, &e.to_string()))?,
        None => ExtractConfig::default(),
    };
    if let Some(dir) = &args.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(file) = &args.output_file {
        config.output_file = file.clone();
    }
    Ok(config)
}

/// Execute the extract command
pub fn run(args: ExtractArgs, clock: &dyn Clock) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let summary = extract(&config, clock, args.quiet || args.json)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if !summary.skipped.is_empty() {
        println!("Skipped {} files (see log for details)", summary.skipped.len());
    }
    println!(
        "Successfully saved {} images to {}",
        summary.images,
        summary.output_file.display()
    );
    Ok(())
}

/// Scan the configured tree and write the timestamped CSV.
///
/// Nothing is written unless the scan itself succeeds.
pub fn extract(
    config: &ExtractConfig,
    clock: &dyn Clock,
    hide_progress: bool,
) -> anyhow::Result<ExtractSummary> {
    let scanner = Scanner::with_config(config);
    let root = &config.input_dir;

    let total = scanner
        .count_qualifying(root)
        .map_err(HelpfulError::from_scan)?;

    let progress = if hide_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total)
    };
    progress.set_style(
        ProgressStyle::with_template("Processing images {bar:40} {pos}/{len} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let outcome = scanner
        .scan_with_progress(root, |_| progress.inc(1))
        .map_err(HelpfulError::from_scan)?;
    progress.finish_and_clear();

    let output_file = timestamped_path(&config.output_file, clock.now());
    write_records(&outcome.records, &output_file)
        .map_err(|e| HelpfulError::cannot_write_output(&output_file, &e.to_string()))?;

    if !outcome.skipped.is_empty() {
        warn!(skipped = outcome.skipped.len(), "Some files were skipped");
    }
    info!(
        images = outcome.records.len(),
        output = %output_file.display(),
        "Saved image summary"
    );

    Ok(ExtractSummary {
        input_dir: root.clone(),
        output_file,
        images: outcome.records.len(),
        skipped: outcome.skipped,
        stats: outcome.stats,
    })
}
