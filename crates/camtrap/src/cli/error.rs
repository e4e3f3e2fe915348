//! Helpful error types for the CLI
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use camtrap_scout::ScoutError;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Input directory does not exist
    pub fn input_dir_not_found(path: &Path) -> Self {
        Self::new(format!("Input directory does not exist: {}", path.display()))
            .with_context("The image tree to scan was not found; no output was written")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Pass the image tree root with --input-dir".to_string(),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    /// Input path exists but is not a directory
    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("--input-dir expects the root folder of the camera trap images")
            .with_suggestion(format!(
                "TRY: Scan the parent directory: camtrap --input-dir {}",
                path.parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string())
            ))
    }

    /// Config file could not be read or parsed
    pub fn invalid_config(path: &Path, details: &str) -> Self {
        Self::new(format!("Invalid config file: {}", path.display()))
            .with_context(details.to_string())
            .with_suggestions([
                "TRY: Keys are input_dir, output_file, extensions, follow_symlinks".to_string(),
                format!("TRY: Check the TOML syntax: cat {}", path.display()),
            ])
    }

    /// Output file could not be written
    pub fn cannot_write_output(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot write output file: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Check write permissions for the output directory".to_string(),
                "TRY: Choose another location with --output-file".to_string(),
            ])
    }

    /// Map a scan failure to an operator-facing error
    pub fn from_scan(err: ScoutError) -> Self {
        match err {
            ScoutError::RootNotFound(path) => Self::input_dir_not_found(&path),
            ScoutError::NotADirectory(path) => Self::not_a_directory(&path),
            other => Self::new(format!("Scan failed: {}", other)),
        }
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Print an error as a JSON object on stdout, for `--json` callers.
pub fn print_json_error(err: &anyhow::Error) {
    let payload = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({
            "error": helpful.message,
            "context": helpful.context,
            "suggestions": helpful.suggestions,
        }),
        None => serde_json::json!({ "error": format!("{:#}", err) }),
    };
    match serde_json::to_string_pretty(&payload) {
        Ok(json) => println!("{}", json),
        Err(_) => eprintln!("{:?}", err),
    }
}
