//! Configuration for an extraction run

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one extraction run.
///
/// Every field has a default so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Root of the image tree
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Requested output path; a timestamp is inserted before the extension
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Image extensions, matched case-insensitively, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to descend into symlinked directories while walking.
    /// Symlinked image files qualify either way.
    #[serde(default)]
    pub follow_symlinks: bool,
}

pub const DEFAULT_OUTPUT_FILE: &str = "camera_trap_images.csv";

pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_file: default_output_file(),
            extensions: default_extensions(),
            follow_symlinks: false,
        }
    }
}

impl ExtractConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: ExtractConfig = toml::from_str(&content)
            .map_err(|e| crate::ScoutError::Config(format!("{}: {}", path.display(), e)))?;
        config.normalize_extensions();
        if config.extensions.is_empty() {
            return Err(crate::ScoutError::Config(format!(
                "{}: `extensions` must list at least one extension",
                path.display()
            )));
        }
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::ScoutError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Lowercase extensions and strip any leading dot
    fn normalize_extensions(&mut self) {
        for ext in &mut self.extensions {
            *ext = ext.trim().trim_start_matches('.').to_lowercase();
        }
        self.extensions.retain(|ext| !ext.is_empty());
    }
}
