//! Writing a device's analysis tables to disk.

pub mod tables;

use crate::Result;
use crate::pipeline::DeviceReport;

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Render every table of a report in memory, as `(file name, contents)`.
pub fn render_device_tables(report: &DeviceReport) -> Result<Vec<(String, Vec<u8>)>> {
    let name = &report.device;
    let mut out = Vec::new();

    let mut buf = Vec::new();
    tables::write_data_table(&mut buf, &report.samples)?;
    out.push((format!("{}_data.csv", name), buf));

    let mut buf = Vec::new();
    tables::write_phases_table(&mut buf, &report.events)?;
    out.push((format!("{}_phases.csv", name), buf));

    let mut buf = Vec::new();
    tables::write_stats_table(&mut buf, &report.phases)?;
    out.push((format!("{}_stats.csv", name), buf));

    if let Some(table) = &report.interfaces {
        let mut buf = Vec::new();
        tables::write_interface_table(&mut buf, table)?;
        out.push((format!("{}_interfaces.csv", name), buf));
    }
    Ok(out)
}

/// Write `<device>_data.csv`, `_phases.csv`, `_stats.csv` and, when the log
/// has interface columns, `_interfaces.csv` into `out_dir`. Returns the paths
/// written, in that order. If any file cannot be written, the ones already
/// written for this device are removed again.
pub fn write_device_tables(out_dir: &Path, report: &DeviceReport) -> Result<Vec<PathBuf>> {
    let rendered = render_device_tables(report)
        .with_context(|| format!("render tables for device {}", report.device))?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(rendered.len());
    for (file, contents) in rendered {
        let path = out_dir.join(file);
        if let Err(e) = fs::write(&path, contents) {
            for p in &written {
                if let Err(rm) = fs::remove_file(p) {
                    log::warn!("cannot remove partial output {}: {}", p.display(), rm);
                }
            }
            return Err(anyhow::Error::new(e).context(format!("write {}", path.display())));
        }
        written.push(path);
    }

    for p in &written {
        log::info!("wrote {}", p.display());
    }
    Ok(written)
}
