//! Console progress lines.

use crate::model::PhaseSummary;
use crate::pipeline::{DeviceOutcome, DeviceReport, DeviceResult};

use std::path::Path;

pub fn device_summary(report: &DeviceReport) -> String {
    format!(
        "  {}: {} data points, {} phases, {} interfaces",
        report.device,
        report.samples.len(),
        report.events.len(),
        report.interface_count()
    )
}

pub fn phase_line(phase: &PhaseSummary) -> String {
    let s = &phase.stats;
    format!(
        "    {:<30}  avg={:.0} mW  std={:.0}  tput={:.0} Mbps  dur={:.0}s  n={}",
        phase.label, s.avg_power_mw, s.std_power_mw, s.avg_throughput_mbps, s.duration_s, s.count
    )
}

pub fn skip_notice(device: &str, path: &Path) -> String {
    format!("  SKIP {}: {} not found", device, path.display())
}

pub fn error_message(device: &str, error: &anyhow::Error) -> String {
    format!("  FAIL {}: {:#}", device, error)
}

/// Print the progress lines for one finished device.
pub fn print_result(result: &DeviceResult) {
    match &result.outcome {
        DeviceOutcome::Processed { report, .. } => {
            println!("{}", device_summary(report));
            for phase in &report.phases {
                println!("{}", phase_line(phase));
            }
        }
        DeviceOutcome::Skipped { path } => println!("{}", skip_notice(&result.device, path)),
        DeviceOutcome::Failed { error } => println!("{}", error_message(&result.device, error)),
    }
}
