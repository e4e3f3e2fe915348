//! Error types for the Scout system

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Scout error type
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Input directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ScoutError>;
