//! Phase timeline extraction from free-text event annotations.
//!
//! An events field holds `|`-separated fragments. Fragments tagged `[phase]`
//! or `[iface_start]` mark a transition at that row's timestamp; everything
//! else is ignored.

use crate::Result;
use crate::columns::{self, ColumnMap};
use crate::rawlog::RawRecord;

use regex::Regex;

pub const PHASE_TAG: &str = "[phase]";
pub const IFACE_START_TAG: &str = "[iface_start]";

const FRAGMENT_SEPARATOR: char = '|';
const INTERFACE_STARTED_RE: &str = r"Interface\s+(.+?)\s+started";

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseTransition {
    Phase(String),
    InterfaceStart(String),
}

impl PhaseTransition {
    pub fn label(&self) -> &str {
        match self {
            PhaseTransition::Phase(l) | PhaseTransition::InterfaceStart(l) => l,
        }
    }
}

/// A transition anchored to the data row it was found on.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseEvent {
    /// Index into the log's data rows (0-based).
    pub row: usize,
    pub elapsed: f64,
    pub transition: PhaseTransition,
}

impl PhaseEvent {
    pub fn label(&self) -> &str {
        self.transition.label()
    }
}

/// Recognizes transition markers in events fields.
pub struct EventScanner {
    interface_started: Regex,
}

impl EventScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            interface_started: Regex::new(INTERFACE_STARTED_RE)?,
        })
    }

    /// All transitions in one events field, in fragment order.
    pub fn scan(&self, field: &str) -> Vec<PhaseTransition> {
        let field = field.trim();
        let field = field.strip_prefix('"').unwrap_or(field);
        let field = field.strip_suffix('"').unwrap_or(field);
        if field.is_empty() {
            return Vec::new();
        }

        field
            .split(FRAGMENT_SEPARATOR)
            .filter_map(|fragment| self.parse_fragment(fragment))
            .collect()
    }

    /// Parse a single fragment; `None` if it is not a marker or its label
    /// is empty once the tags are removed.
    pub fn parse_fragment(&self, fragment: &str) -> Option<PhaseTransition> {
        let fragment = fragment.trim();
        let is_iface = fragment.contains(IFACE_START_TAG);
        if !is_iface && !fragment.contains(PHASE_TAG) {
            return None;
        }

        let stripped = fragment.replace(PHASE_TAG, "").replace(IFACE_START_TAG, "");
        let mut label = stripped.trim();
        if label.contains("Interface") && label.contains("started") {
            if let Some(name) = self.interface_started.captures(label).and_then(|c| c.get(1)) {
                label = name.as_str().trim();
            }
        }
        if label.is_empty() {
            return None;
        }

        let label = label.to_string();
        Some(if is_iface {
            PhaseTransition::InterfaceStart(label)
        } else {
            PhaseTransition::Phase(label)
        })
    }
}

/// Scan every row and return the phase timeline in file order.
///
/// Rows without an events value (column absent, row too short, or empty)
/// contribute nothing. The elapsed time is only decoded for rows that carry
/// at least one marker.
pub fn extract_phase_events(rows: &[RawRecord], cols: &ColumnMap) -> Result<Vec<PhaseEvent>> {
    let Some(events_idx) = cols.events else {
        return Ok(Vec::new());
    };
    let scanner = EventScanner::new()?;

    let mut out: Vec<PhaseEvent> = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let Some(field) = row.get(events_idx) else {
            continue;
        };
        let transitions = scanner.scan(field);
        if transitions.is_empty() {
            continue;
        }

        let elapsed = row.number(cols.elapsed, columns::ELAPSED)?;
        if let Some(prev) = out.last() {
            if elapsed < prev.elapsed {
                log::warn!(
                    "line {}: phase marker at {}s is earlier than previous marker at {}s",
                    row.line,
                    elapsed,
                    prev.elapsed
                );
            }
        }

        for transition in transitions {
            match &transition {
                PhaseTransition::Phase(label) => {
                    log::debug!("line {}: phase '{}' starts at {}s", row.line, label, elapsed)
                }
                PhaseTransition::InterfaceStart(name) => {
                    log::info!("line {}: interface '{}' started at {}s", row.line, name, elapsed)
                }
            }
            out.push(PhaseEvent {
                row: row_idx,
                elapsed,
                transition,
            });
        }
    }

    Ok(out)
}
