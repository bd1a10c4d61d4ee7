use crate::error::PipelineError;
use std::path::PathBuf;

/// One data line of a raw log, split into fields.
///
/// Fields are kept as text; numeric decoding happens when a consumer asks for
/// a specific column, so a short or garbled row only fails where it is used.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the source file.
    pub line: usize,
    fields: Vec<String>,
}

impl RawRecord {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    /// Field at `idx`, or a `MalformedRow` error naming `column`.
    pub fn field(&self, idx: usize, column: &str) -> Result<&str, PipelineError> {
        self.get(idx).ok_or_else(|| PipelineError::MalformedRow {
            line: self.line,
            column: column.to_string(),
            reason: format!("missing (row has {} fields, need {})", self.fields.len(), idx + 1),
        })
    }

    pub fn number(&self, idx: usize, column: &str) -> Result<f64, PipelineError> {
        let raw = self.field(idx, column)?;
        raw.trim()
            .parse::<f64>()
            .map_err(|e| PipelineError::MalformedRow {
                line: self.line,
                column: column.to_string(),
                reason: format!("is not a number: {:?} ({})", raw, e),
            })
    }
}

/// Header plus data rows of one log file, in file order.
#[derive(Debug, Clone)]
pub struct RawLog {
    pub path: PathBuf,
    pub header: Vec<String>,
    pub rows: Vec<RawRecord>,
}
