//! Aggregation model: split the sample series into phase intervals and
//! summarize each one.

pub mod interfaces;
pub mod samples;
pub mod stats;

pub use interfaces::{InterfaceRow, InterfaceTable, build_interface_table};
pub use samples::{Sample, clean_samples};

use crate::events::PhaseEvent;
use serde::Deserialize;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStats {
    pub avg_power_mw: f64,
    pub std_power_mw: f64,
    pub min_power_mw: f64,
    pub max_power_mw: f64,
    pub avg_throughput_mbps: f64,
    pub std_throughput_mbps: f64,
    pub duration_s: f64,
    pub count: usize,
    pub efficiency_mbps_per_w: f64,
}

/// Statistics for the rows between one phase event and the next.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalStats {
    /// Position of the opening event in the phase timeline.
    pub index: usize,
    pub label: String,
    pub rows: Range<usize>,
    pub stats: PhaseStats,
}

/// One row of the phase statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSummary {
    pub label: String,
    pub stats: PhaseStats,
}

/// How intervals sharing a label end up in the statistics table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatedPhases {
    /// One entry per label; a later interval replaces the earlier entry in
    /// place.
    #[default]
    Overwrite,
    /// One entry per interval, in timeline order.
    PerInterval,
}

/// Half-open row range opened by `events[i]`.
pub fn interval_rows(events: &[PhaseEvent], i: usize, total_rows: usize) -> Range<usize> {
    let start = events[i].row;
    let end = events.get(i + 1).map_or(total_rows, |next| next.row);
    start..end.max(start)
}

pub fn summarize_samples(samples: &[Sample], start_time: f64, end_time: f64) -> PhaseStats {
    let powers: Vec<f64> = samples.iter().map(|s| s.power_mw).collect();
    let tputs: Vec<f64> = samples.iter().map(|s| s.throughput_mbps).collect();

    let power = stats::moments(&powers);
    let tput = stats::moments(&tputs);
    PhaseStats {
        avg_power_mw: power.mean,
        std_power_mw: power.stdev,
        min_power_mw: power.min,
        max_power_mw: power.max,
        avg_throughput_mbps: tput.mean,
        std_throughput_mbps: tput.stdev,
        duration_s: end_time - start_time,
        count: samples.len(),
        efficiency_mbps_per_w: stats::efficiency_mbps_per_w(tput.mean, power.mean),
    }
}

/// Aggregate every non-empty interval of the timeline.
///
/// Each row from the first event onward lands in exactly one interval. An
/// event immediately followed by another on the same row opens an empty
/// interval, which is dropped. Duration runs from the opening event's
/// timestamp to the elapsed time of the interval's last row.
pub fn aggregate_phases(samples: &[Sample], events: &[PhaseEvent]) -> Vec<IntervalStats> {
    let mut out = Vec::new();
    for (i, ev) in events.iter().enumerate() {
        let rows = interval_rows(events, i, samples.len());
        let Some(slice) = samples.get(rows.clone()) else {
            log::warn!("phase '{}' row range {:?} is out of bounds", ev.label(), rows);
            continue;
        };
        if slice.is_empty() {
            continue;
        }
        let end_time = slice.last().map_or(ev.elapsed, |s| s.elapsed);

        out.push(IntervalStats {
            index: i,
            label: ev.label().to_string(),
            rows,
            stats: summarize_samples(slice, ev.elapsed, end_time),
        });
    }
    out
}

/// Build the statistics table rows from interval results.
pub fn summarize_phases(intervals: &[IntervalStats], mode: RepeatedPhases) -> Vec<PhaseSummary> {
    let mut out: Vec<PhaseSummary> = Vec::new();
    for iv in intervals {
        let summary = PhaseSummary {
            label: iv.label.clone(),
            stats: iv.stats.clone(),
        };
        match mode {
            RepeatedPhases::PerInterval => out.push(summary),
            RepeatedPhases::Overwrite => match out.iter_mut().find(|s| s.label == iv.label) {
                Some(existing) => {
                    log::warn!(
                        "phase '{}' repeats (interval {}, rows {:?}); keeping only its latest statistics",
                        iv.label,
                        iv.index,
                        iv.rows
                    );
                    *existing = summary;
                }
                None => out.push(summary),
            },
        }
    }
    out
}
