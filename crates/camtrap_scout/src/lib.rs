//! Camtrap Scout - Camera Trap Image Discovery
//!
//! Scout walks a camera trap image tree, reads the metadata encoded in the
//! folder layout and produces one [`ImageRecord`] per image.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Root     │     │   Scanner   │     │ Interpreter │     │    Output   │
//! │ (image tree)│────▶│  (walkdir)  │────▶│ (path → row)│────▶│    (CSV)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Expected layout
//!
//! `root/camera/.../species/count/filename.jpg`. The layout is assumed, never
//! enforced: missing levels resolve to `"unknown"`.

pub mod clock;
pub mod config;
pub mod error;
pub mod interpret;
pub mod output;
pub mod scanner;
pub mod types;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ExtractConfig;
pub use error::{Result, ScoutError};
pub use output::{timestamped_path, write_records};
pub use scanner::Scanner;
pub use types::{ImageRecord, ScanOutcome, ScanStats, SkippedFile, UNKNOWN};
