//! Path interpretation: turn an image path into an [`ImageRecord`].
//!
//! Everything here is a pure function of the path. Paths handed to
//! [`interpret_path`] are relative to the scan root, so ancestor lookups never
//! climb above the root.

use crate::error::{Result, ScoutError};
use crate::types::{ImageRecord, UNKNOWN};
use std::path::{Component, Path};

/// Levels between an image and its camera directory
const CAMERA_LEVELS: usize = 3;
const SPECIES_LEVELS: usize = 2;
const COUNT_LEVELS: usize = 1;

/// Build the normalized image identifier.
///
/// A stem of the form `YYYY MM DD hh mm ss [...]` becomes
/// `{camera_id}_YYYY-MM-DD_hh-mm-ss_JPEG`. Tokens are taken verbatim and
/// anything past the sixth is dropped. Any other name is returned unchanged,
/// extension included.
pub fn format_image_id(file_path: &Path, camera_id: &str) -> String {
    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let parts: Vec<&str> = stem.split_whitespace().collect();

    if let [year, month, day, hour, minute, second, ..] = parts.as_slice() {
        return format!("{camera_id}_{year}-{month}-{day}_{hour}-{minute}-{second}_JPEG");
    }

    file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Name of the directory `levels` parent steps above `path`.
///
/// Returns `None` when the ancestor does not exist or has no usable name
/// (root, `.`, `..`, empty).
pub fn ancestor_name(path: &Path, levels: usize) -> Option<String> {
    let mut current = path;
    for _ in 0..levels {
        current = current.parent()?;
    }
    match current.components().next_back()? {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// Camera directory name, three levels above the image, or `"unknown"`.
///
/// Computed independently of the first-segment camera id used by
/// [`format_image_id`]; the two can disagree on irregular trees.
pub fn extract_camera(file_path: &Path) -> String {
    ancestor_name(file_path, CAMERA_LEVELS).unwrap_or_else(|| UNKNOWN.to_string())
}

/// Species directory name (grandparent), or `"unknown"`.
pub fn extract_species(file_path: &Path) -> String {
    ancestor_name(file_path, SPECIES_LEVELS).unwrap_or_else(|| UNKNOWN.to_string())
}

/// Count directory name (parent). Empty for a file directly in the root.
pub fn extract_count(file_path: &Path) -> String {
    ancestor_name(file_path, COUNT_LEVELS).unwrap_or_default()
}

/// First directory of a relative path, or `"unknown"` for a file in the root.
pub fn camera_id(relative_path: &Path) -> String {
    let mut components = relative_path.components();
    // The last component is the file itself.
    components.next_back();
    match components.next() {
        Some(Component::Normal(first)) => first.to_string_lossy().into_owned(),
        _ => UNKNOWN.to_string(),
    }
}

/// Relative parent directory joined with `/`. Empty for a file in the root.
pub fn location(relative_path: &Path) -> String {
    relative_path
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

/// Derive all five output fields from a path relative to the scan root.
pub fn interpret_path(relative_path: &Path) -> Result<ImageRecord> {
    if relative_path.file_name().is_none() {
        return Err(ScoutError::InvalidPath(format!(
            "no file name in '{}'",
            relative_path.display()
        )));
    }
    if relative_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(ScoutError::InvalidPath(format!(
            "'{}' is not a plain relative path",
            relative_path.display()
        )));
    }

    let camera_id = camera_id(relative_path);
    Ok(ImageRecord {
        image_id: format_image_id(relative_path, &camera_id),
        location: location(relative_path),
        camera: extract_camera(relative_path),
        species: extract_species(relative_path),
        count: extract_count(relative_path),
    })
}
