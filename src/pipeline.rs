//! Per-device processing and the batch driver.

use crate::Result;
use crate::columns::resolve_columns;
use crate::config::{BatchConfig, DeviceSpec};
use crate::error::PipelineError;
use crate::events::{PhaseEvent, extract_phase_events};
use crate::model::{self, InterfaceTable, IntervalStats, PhaseSummary, RepeatedPhases, Sample};
use crate::rawlog::{RawLog, read_log_file};
use crate::render;

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything derived from one device log.
#[derive(Debug, Clone)]
pub struct DeviceReport {
    pub device: String,
    pub samples: Vec<Sample>,
    pub events: Vec<PhaseEvent>,
    pub intervals: Vec<IntervalStats>,
    pub phases: Vec<PhaseSummary>,
    pub interfaces: Option<InterfaceTable>,
}

impl DeviceReport {
    pub fn interface_count(&self) -> usize {
        self.interfaces.as_ref().map_or(0, |t| t.names.len())
    }
}

#[derive(Debug)]
pub enum DeviceOutcome {
    Processed {
        report: DeviceReport,
        written: Vec<PathBuf>,
    },
    /// Input file does not exist.
    Skipped { path: PathBuf },
    Failed { error: anyhow::Error },
}

#[derive(Debug)]
pub struct DeviceResult {
    pub device: String,
    pub outcome: DeviceOutcome,
}

/// Derive all tables for one parsed log. Nothing is written.
pub fn analyze_log(device: &str, log: &RawLog, mode: RepeatedPhases) -> Result<DeviceReport> {
    let cols = resolve_columns(&log.header, &log.path)?;

    let samples = model::clean_samples(&log.rows, &cols)?;
    let events = extract_phase_events(&log.rows, &cols)?;
    let intervals = model::aggregate_phases(&samples, &events);
    let phases = model::summarize_phases(&intervals, mode);
    let interfaces = model::build_interface_table(&log.rows, &cols)?;

    Ok(DeviceReport {
        device: device.to_string(),
        samples,
        events,
        intervals,
        phases,
        interfaces,
    })
}

/// Read, analyze and write one device. Files are only created once the whole
/// log has been analyzed successfully.
pub fn process_device(
    device: &DeviceSpec,
    out_dir: &Path,
    mode: RepeatedPhases,
) -> Result<(DeviceReport, Vec<PathBuf>)> {
    let log = read_log_file(&device.path)?;
    let report = analyze_log(&device.name, &log, mode)
        .with_context(|| format!("analyze device {}", device.name))?;
    let written = render::write_device_tables(out_dir, &report)?;
    Ok((report, written))
}

/// Process every configured device in order. A device that is missing or
/// fails does not stop the batch; `on_device` sees each result as soon as it
/// is known. Only failing to create the output directory is an error.
pub fn run_batch<F>(config: &BatchConfig, mut on_device: F) -> Result<Vec<DeviceResult>>
where
    F: FnMut(&DeviceResult),
{
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("create output directory {}", config.output_dir.display())
    })?;

    let mut results = Vec::with_capacity(config.devices.len());
    for device in &config.devices {
        let outcome = match process_device(device, &config.output_dir, config.repeated_phases) {
            Ok((report, written)) => DeviceOutcome::Processed { report, written },
            Err(error) => {
                let missing = match error.downcast_ref::<PipelineError>() {
                    Some(PipelineError::MissingFile { path }) => Some(path.clone()),
                    _ => None,
                };
                match missing {
                    Some(path) => DeviceOutcome::Skipped { path },
                    None => {
                        log::error!("device {}: {:#}", device.name, error);
                        DeviceOutcome::Failed { error }
                    }
                }
            }
        };

        let result = DeviceResult {
            device: device.name.clone(),
            outcome,
        };
        on_device(&result);
        results.push(result);
    }
    Ok(results)
}
