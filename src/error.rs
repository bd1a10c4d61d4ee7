//! Error kinds raised while turning one device log into tables.
//!
//! They are carried inside `anyhow::Error`; the batch driver downcasts to
//! decide whether a device is skipped or reported as failed.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("required column '{column}' not found in header of {}", path.display())]
    MissingColumn { column: &'static str, path: PathBuf },

    #[error("malformed row at line {line}: column '{column}' {reason}")]
    MalformedRow {
        line: usize,
        column: String,
        reason: String,
    },
}
