//! CSV output for scan results

use crate::error::Result;
use crate::types::ImageRecord;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column headers, in output order
pub const HEADERS: [&str; 5] = ["Image ID", "Location", "Camera", "Species", "Count"];

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Insert a run timestamp between the file stem and its extension.
///
/// `out/camera_trap_images.csv` becomes
/// `out/camera_trap_images_20240102_030405.csv`.
pub fn timestamped_path(base: &Path, now: DateTime<Local>) -> PathBuf {
    let timestamp = now.format(TIMESTAMP_FORMAT);
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, timestamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, timestamp),
    };
    base.with_file_name(name)
}

/// Write records as CSV with a header row, creating parent directories.
pub fn write_records(records: &[ImageRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = records.len(), "Wrote CSV output");
    Ok(())
}
