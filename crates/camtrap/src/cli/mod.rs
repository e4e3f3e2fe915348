//! CLI module for camtrap
//!
//! The binary has a single job: scan an image tree and write the CSV
//! summary. Operator-facing errors live in [`error`].

pub mod error;
pub mod extract;
