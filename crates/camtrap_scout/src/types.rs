//! Core types for the Scout system

use serde::{Deserialize, Serialize};

/// Placeholder for any field whose directory level is missing
pub const UNKNOWN: &str = "unknown";

/// One output row describing a discovered image.
///
/// Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(rename = "Image ID")]
    pub image_id: String,
    /// Directory containing the image, relative to the scan root, `/`-separated
    #[serde(rename = "Location")]
    pub location: String,
    /// Name of the directory three levels above the image
    #[serde(rename = "Camera")]
    pub camera: String,
    #[serde(rename = "Species")]
    pub species: String,
    #[serde(rename = "Count")]
    pub count: String,
}

/// A qualifying file that could not be turned into a record
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Statistics from a scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    /// Files that passed the image filter
    pub files_qualifying: u64,
    /// Records produced
    pub files_extracted: u64,
    /// Qualifying files or walk entries that failed
    pub files_skipped: u64,
    pub dirs_walked: u64,
    pub duration_ms: u64,
}

/// Result of a scan: records sorted by `image_id`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanOutcome {
    pub records: Vec<ImageRecord>,
    pub skipped: Vec<SkippedFile>,
    pub stats: ScanStats,
}
