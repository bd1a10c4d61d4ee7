use crate::Result;
use crate::error::PipelineError;
use crate::rawlog::row::{RawLog, RawRecord};

use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const DELIMITER: u8 = b',';
const COMMENT_MARKER: char = '#';
const BOM: char = '\u{feff}';

/// Read a raw measurement log from disk.
///
/// A path that does not exist yields `PipelineError::MissingFile`; the caller
/// decides whether that is fatal.
pub fn read_log_file(path: &Path) -> Result<RawLog> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PipelineError::MissingFile {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context(format!("read log file {}", path.display())));
        }
    };
    parse_log_text(&text, path)
}

/// Split log text into header and records.
///
/// Lines that are blank or start with `#` (after trimming) are skipped
/// wherever they occur. The first remaining line is the header and is split
/// naively on commas; every later line goes through a quote-aware CSV parse so
/// an events field like `"a, b|c"` stays one field.
pub fn parse_log_text(text: &str, path: &Path) -> Result<RawLog> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        if header.is_none() {
            header = Some(line.split(DELIMITER as char).map(str::to_string).collect());
            continue;
        }

        let fields = split_quoted(line, lno)
            .with_context(|| format!("log parse error at {}:{}", path.display(), lno))?;
        rows.push(RawRecord::new(lno, fields));
    }

    Ok(RawLog {
        path: path.to_path_buf(),
        header: header.unwrap_or_default(),
        rows,
    })
}

fn split_quoted(line: &str, lno: usize) -> std::result::Result<Vec<String>, PipelineError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(DELIMITER)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Ok(record.iter().map(str::to_string).collect()),
        Ok(false) => Ok(Vec::new()),
        Err(e) => Err(PipelineError::MalformedRow {
            line: lno,
            column: "*".to_string(),
            reason: format!("cannot be split into fields: {}", e),
        }),
    }
}
