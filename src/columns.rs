//! Header resolution: logical fields and per-interface throughput columns.

use crate::Result;
use crate::error::PipelineError;

use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

pub const ELAPSED: &str = "ElapsedSeconds";
pub const POWER: &str = "PowerMW";
pub const THROUGHPUT_TOTAL: &str = "ThroughputTotalMbps";
pub const PHASE: &str = "Phase";
pub const EVENTS: &str = "Events";

const INTERFACE_COLUMN_RE: &str = r"^Throughput_(.+)_Mbps$";

/// Column positions for one log file.
///
/// The three numeric series are required; phase text, events and interface
/// columns may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub elapsed: usize,
    pub power: usize,
    pub throughput_total: usize,
    pub phase: Option<usize>,
    pub events: Option<usize>,
    /// Normalized interface name -> column index, iterated in name order.
    pub interfaces: BTreeMap<String, usize>,
}

/// First header position whose trimmed text equals `name`, ignoring case.
pub fn find_column(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Collect `Throughput_<name>_Mbps` columns keyed by `<name>` with spaces
/// turned into underscores. A later column with the same name replaces an
/// earlier one.
pub fn interface_columns(header: &[String]) -> Result<BTreeMap<String, usize>> {
    let re = Regex::new(INTERFACE_COLUMN_RE)?;

    let mut out = BTreeMap::new();
    for (idx, h) in header.iter().enumerate() {
        let Some(caps) = re.captures(h.trim()) else {
            continue;
        };
        let name = caps[1].replace(' ', "_");
        if let Some(prev) = out.insert(name.clone(), idx) {
            log::warn!(
                "interface '{}' appears in columns {} and {}; using column {}",
                name,
                prev,
                idx,
                idx
            );
        }
    }
    Ok(out)
}

/// Resolve all columns of a header, failing on the first required column
/// that is missing.
pub fn resolve_columns(header: &[String], path: &Path) -> Result<ColumnMap> {
    let required = |column: &'static str| -> Result<usize> {
        find_column(header, column).ok_or_else(|| {
            PipelineError::MissingColumn {
                column,
                path: path.to_path_buf(),
            }
            .into()
        })
    };

    let map = ColumnMap {
        elapsed: required(ELAPSED)?,
        power: required(POWER)?,
        throughput_total: required(THROUGHPUT_TOTAL)?,
        phase: find_column(header, PHASE),
        events: find_column(header, EVENTS),
        interfaces: interface_columns(header)?,
    };

    if map.events.is_none() {
        log::warn!("{}: no '{}' column, no phases will be detected", path.display(), EVENTS);
    }
    log::debug!("{}: resolved columns {:?}", path.display(), map);

    Ok(map)
}
