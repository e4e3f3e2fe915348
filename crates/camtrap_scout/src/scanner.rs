//! Directory scanner
//!
//! Walks an image tree with `walkdir`, keeps the files that look like camera
//! trap images and hands each one to the path interpreter.
//!
//! # Design
//!
//! - Sequential walk; traversal order does not matter because the records are
//!   sorted by image id at the end
//! - A failing entry is logged and recorded as skipped, never fatal
//! - Only a missing (or non-directory) root aborts the scan

use crate::config::ExtractConfig;
use crate::error::{Result, ScoutError};
use crate::interpret::interpret_path;
use crate::types::{ImageRecord, ScanOutcome, ScanStats, SkippedFile, UNKNOWN};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Scanner for camera trap image trees
#[derive(Debug, Clone)]
pub struct Scanner {
    /// Lowercase extensions without the dot
    extensions: Vec<String>,
    follow_symlinks: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::with_config(&ExtractConfig::default())
    }
}

impl Scanner {
    /// Create a scanner for `.jpg`/`.jpeg` files
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ExtractConfig) -> Self {
        Self {
            extensions: config
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            follow_symlinks: config.follow_symlinks,
        }
    }

    /// Whether a file name has one of the image extensions and is not hidden.
    pub fn is_image_name(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if name.to_string_lossy().starts_with('.') {
            return false;
        }
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }

    /// Regular files qualify, including symlinks that resolve to one.
    /// Symlinked directories are still not descended unless configured.
    fn qualifies(&self, entry: &DirEntry) -> bool {
        if !self.is_image_name(entry.path()) {
            return false;
        }
        let file_type = entry.file_type();
        if file_type.is_file() {
            return true;
        }
        file_type.is_symlink()
            && fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file())
    }

    fn walker(&self, root: &Path) -> walkdir::IntoIter {
        WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.follow_symlinks)
            .into_iter()
    }

    /// Count qualifying files without interpreting them.
    ///
    /// Used to size progress reporting before [`Scanner::scan_with_progress`].
    pub fn count_qualifying(&self, root: &Path) -> Result<u64> {
        validate_root(root)?;
        let count = self
            .walker(root)
            .filter_map(|entry| entry.ok())
            .filter(|entry| self.qualifies(entry))
            .count();
        Ok(count as u64)
    }

    /// Scan `root` and return one record per qualifying image.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        self.scan_with_progress(root, |_| {})
    }

    /// Scan `root`, calling `on_file` once per qualifying file after it has
    /// been handled (extracted or skipped).
    pub fn scan_with_progress<F>(&self, root: &Path, mut on_file: F) -> Result<ScanOutcome>
    where
        F: FnMut(&Path),
    {
        validate_root(root)?;
        let start = Instant::now();
        info!(root = %root.display(), "Scanning for camera trap images");

        let mut records: Vec<ImageRecord> = Vec::new();
        let mut skipped: Vec<SkippedFile> = Vec::new();
        let mut stats = ScanStats::default();

        for entry in self.walker(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| UNKNOWN.to_string());
                    warn!(path = %path, error = %err, "Skipping unreadable entry");
                    stats.files_skipped += 1;
                    skipped.push(SkippedFile {
                        path,
                        reason: ScoutError::from(err).to_string(),
                    });
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                stats.dirs_walked += 1;
                continue;
            }
            if !self.qualifies(&entry) {
                continue;
            }

            stats.files_qualifying += 1;
            match extract_record(root, entry.path()) {
                Ok(record) => {
                    debug!(
                        path = %entry.path().display(),
                        image_id = %record.image_id,
                        "Extracted"
                    );
                    stats.files_extracted += 1;
                    records.push(record);
                }
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "Error processing file");
                    stats.files_skipped += 1;
                    skipped.push(SkippedFile {
                        path: entry.path().display().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
            on_file(entry.path());
        }

        records.sort_by(|a, b| a.image_id.cmp(&b.image_id));
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            records = records.len(),
            skipped = skipped.len(),
            dirs = stats.dirs_walked,
            duration_ms = stats.duration_ms,
            "Scan complete"
        );

        Ok(ScanOutcome {
            records,
            skipped,
            stats,
        })
    }
}

/// Fail fast when the root is missing or is not a directory.
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(ScoutError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScoutError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

fn extract_record(root: &Path, path: &Path) -> Result<ImageRecord> {
    let relative = path.strip_prefix(root).map_err(|_| {
        ScoutError::InvalidPath(format!(
            "'{}' is not under '{}'",
            path.display(),
            root.display()
        ))
    })?;
    interpret_path(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"\xFF\xD8\xFF").unwrap();
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp = TempDir::new().unwrap();
        let outcome = Scanner::new().scan(temp.path()).unwrap();
        assert!(outcome.records.is_empty());
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.stats.files_qualifying, 0);
    }

    #[test]
    fn test_scan_filters_non_images() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "CamA/Fox/3/a.jpg");
        create_test_file(temp.path(), "CamA/Fox/3/b.JPEG");
        create_test_file(temp.path(), "CamA/Fox/3/c.Jpg");
        create_test_file(temp.path(), "CamA/Fox/3/notes.txt");
        create_test_file(temp.path(), "CamA/Fox/3/.hidden.jpg");
        create_test_file(temp.path(), "CamA/Fox/3/raw.png");
        create_test_file(temp.path(), "CamA/Fox/3/noext");
        fs::create_dir_all(temp.path().join("CamA/Fox/3/folder.jpg")).unwrap();

        let outcome = Scanner::new().scan(temp.path()).unwrap();
        let ids: Vec<&str> = outcome.records.iter().map(|r| r.image_id.as_str()).collect();
        assert_eq!(ids, vec!["a.jpg", "b.JPEG", "c.Jpg"]);
        assert_eq!(outcome.stats.files_qualifying, 3);
    }

    #[test]
    fn test_scan_descends_hidden_directories() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), ".cache/Fox/3/a.jpg");

        let outcome = Scanner::new().scan(temp.path()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].camera, ".cache");
    }

    #[test]
    fn test_scan_same_folder_rows_share_fields() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "CamA/Fox/3/photo1.jpg");
        create_test_file(temp.path(), "CamA/Fox/3/photo2.jpg");

        let outcome = Scanner::new().scan(temp.path()).unwrap();
        assert_eq!(outcome.records.len(), 2);
        let (a, b) = (&outcome.records[0], &outcome.records[1]);
        assert_eq!(a.image_id, "photo1.jpg");
        assert_eq!(b.image_id, "photo2.jpg");
        for rec in [a, b] {
            assert_eq!(rec.location, "CamA/Fox/3");
            assert_eq!(rec.camera, "CamA");
            assert_eq!(rec.species, "Fox");
            assert_eq!(rec.count, "3");
        }
    }

    #[test]
    fn test_scan_sorts_by_image_id() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "CamB/Deer/1/2021 05 01 12 00 00.jpg");
        create_test_file(temp.path(), "CamA/Fox/3/zebra.jpg");
        create_test_file(temp.path(), "CamA/Fox/2/2020 01 15 08 30 00.jpg");
        create_test_file(temp.path(), "IMG_0001.jpg");

        let outcome = Scanner::new().scan(temp.path()).unwrap();
        let ids: Vec<&str> = outcome.records.iter().map(|r| r.image_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "CamA_2020-01-15_08-30-00_JPEG",
                "CamB_2021-05-01_12-00-00_JPEG",
                "IMG_0001.jpg",
                "zebra.jpg",
            ]
        );
        for pair in outcome.records.windows(2) {
            assert!(pair[0].image_id <= pair[1].image_id);
        }
    }

    #[test]
    fn test_scan_file_in_root() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "loose.jpg");

        let outcome = Scanner::new().scan(temp.path()).unwrap();
        let rec = &outcome.records[0];
        assert_eq!(rec.location, "");
        assert_eq!(rec.camera, UNKNOWN);
        assert_eq!(rec.species, UNKNOWN);
        assert_eq!(rec.count, "");
    }

    #[test]
    fn test_scan_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = Scanner::new().scan(&missing).unwrap_err();
        assert!(matches!(err, ScoutError::RootNotFound(_)));
    }

    #[test]
    fn test_scan_root_is_file() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "a.jpg");
        let err = Scanner::new().scan(&temp.path().join("a.jpg")).unwrap_err();
        assert!(matches!(err, ScoutError::NotADirectory(_)));
    }

    #[test]
    fn test_count_matches_scan() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "CamA/Fox/3/a.jpg");
        create_test_file(temp.path(), "CamA/Fox/4/b.jpeg");
        create_test_file(temp.path(), "CamA/Fox/4/c.txt");

        let scanner = Scanner::new();
        let count = scanner.count_qualifying(temp.path()).unwrap();
        let outcome = scanner.scan(temp.path()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(outcome.records.len() as u64, count);
    }

    #[test]
    fn test_progress_called_per_qualifying_file() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "CamA/Fox/3/a.jpg");
        create_test_file(temp.path(), "CamA/Fox/3/b.jpg");
        create_test_file(temp.path(), "CamA/Fox/3/skip.txt");

        let mut seen = 0;
        Scanner::new()
            .scan_with_progress(temp.path(), |_| seen += 1)
            .unwrap();
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_scan_is_repeatable() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "CamA/Fox/3/a.jpg");
        create_test_file(temp.path(), "CamB/Owl/1/2020 01 01 00 00 00.jpg");

        let scanner = Scanner::new();
        let first = scanner.scan(temp.path()).unwrap();
        let second = scanner.scan(temp.path()).unwrap();
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn test_custom_extensions() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "CamA/Fox/3/a.jpg");
        create_test_file(temp.path(), "CamA/Fox/3/b.png");

        let config = ExtractConfig {
            extensions: vec![".PNG".to_string()],
            ..ExtractConfig::default()
        };
        let outcome = Scanner::with_config(&config).scan(temp.path()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].image_id, "b.png");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_image_file_qualifies() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "CamA/Fox/3/a.jpg");
        std::os::unix::fs::symlink(
            temp.path().join("CamA/Fox/3/a.jpg"),
            temp.path().join("CamA/Fox/3/link.jpg"),
        )
        .unwrap();

        let scanner = Scanner::new();
        let outcome = scanner.scan(temp.path()).unwrap();
        let ids: Vec<&str> = outcome.records.iter().map(|r| r.image_id.as_str()).collect();
        assert_eq!(ids, vec!["a.jpg", "link.jpg"]);
        assert_eq!(scanner.count_qualifying(temp.path()).unwrap(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_not_descended_by_default() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        create_test_file(outside.path(), "Fox/3/a.jpg");
        fs::create_dir_all(temp.path().join("CamA")).unwrap();
        std::os::unix::fs::symlink(outside.path().join("Fox"), temp.path().join("CamA/Fox"))
            .unwrap();

        let outcome = Scanner::new().scan(temp.path()).unwrap();
        assert!(outcome.records.is_empty());

        let config = ExtractConfig {
            follow_symlinks: true,
            ..ExtractConfig::default()
        };
        let outcome = Scanner::with_config(&config).scan(temp.path()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].location, "CamA/Fox/3");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_with_image_name_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("CamA/Fox/3/real")).unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("CamA/Fox/3/real"),
            temp.path().join("CamA/Fox/3/folder.jpg"),
        )
        .unwrap();

        let outcome = Scanner::new().scan(temp.path()).unwrap();
        assert!(outcome.records.is_empty());
        assert!(outcome.skipped.is_empty());
    }
}
