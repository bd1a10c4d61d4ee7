//! Fixed-schema comma-separated tables. Nothing is quoted, so commas inside
//! labels are rewritten to semicolons.

use crate::Result;
use crate::events::PhaseEvent;
use crate::model::interfaces::interface_column_name;
use crate::model::{InterfaceTable, PhaseSummary, Sample};

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use std::io::Write;

pub const DATA_HEADER: [&str; 4] = ["ElapsedSeconds", "PowerMW", "ThroughputTotalMbps", "Phase"];
pub const PHASES_HEADER: [&str; 2] = ["PhaseStartSeconds", "PhaseName"];
pub const STATS_HEADER: [&str; 10] = [
    "Phase",
    "AvgPowerMW",
    "StdDevPowerMW",
    "MinPowerMW",
    "MaxPowerMW",
    "AvgThroughputMbps",
    "StdDevThroughputMbps",
    "DurationSeconds",
    "DataPoints",
    "EfficiencyMbpsPerW",
];

pub fn sanitize_label(label: &str) -> String {
    label.replace(',', ";")
}

/// Shortest round-trip form, with `.0` appended to integral values.
pub fn fmt_float(x: f64) -> String {
    let s = x.to_string();
    if x.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}

fn table_writer<W: Write>(w: W) -> Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(false)
        .from_writer(w)
}

pub fn write_data_table<W: Write>(w: W, samples: &[Sample]) -> Result<()> {
    let mut out = table_writer(w);
    out.write_record(DATA_HEADER)?;
    for s in samples {
        out.write_record([
            fmt_float(s.elapsed),
            fmt_float(s.power_mw),
            fmt_float(s.throughput_mbps),
            sanitize_label(&s.phase),
        ])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_phases_table<W: Write>(w: W, events: &[PhaseEvent]) -> Result<()> {
    let mut out = table_writer(w);
    out.write_record(PHASES_HEADER)?;
    for ev in events {
        out.write_record([fmt_float(ev.elapsed), sanitize_label(ev.label())])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_stats_table<W: Write>(w: W, phases: &[PhaseSummary]) -> Result<()> {
    let mut out = table_writer(w);
    out.write_record(STATS_HEADER)?;
    for p in phases {
        let s = &p.stats;
        out.write_record([
            sanitize_label(&p.label),
            format!("{:.1}", s.avg_power_mw),
            format!("{:.1}", s.std_power_mw),
            format!("{:.1}", s.min_power_mw),
            format!("{:.1}", s.max_power_mw),
            format!("{:.1}", s.avg_throughput_mbps),
            format!("{:.1}", s.std_throughput_mbps),
            format!("{:.0}", s.duration_s),
            s.count.to_string(),
            format!("{:.2}", s.efficiency_mbps_per_w),
        ])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_interface_table<W: Write>(w: W, table: &InterfaceTable) -> Result<()> {
    let mut out = table_writer(w);

    let mut header = vec![DATA_HEADER[0].to_string()];
    header.extend(
        table
            .names
            .iter()
            .map(|n| interface_column_name(&sanitize_label(n))),
    );
    out.write_record(&header)?;

    for row in &table.rows {
        out.write_field(&row.elapsed)?;
        for v in &row.values {
            out.write_field(v)?;
        }
        out.write_record(None::<&[u8]>)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PhaseTransition;
    use crate::model::{InterfaceRow, PhaseStats};
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn float_formatting() {
        assert_eq!(fmt_float(1000.0), "1000.0");
        assert_eq!(fmt_float(0.0), "0.0");
        assert_eq!(fmt_float(12.25), "12.25");
        assert_eq!(fmt_float(-3.0), "-3.0");
    }

    #[test]
    fn data_table_passes_values_through() {
        let samples = vec![Sample {
            elapsed: 1.5,
            power_mw: 4200.0,
            throughput_mbps: 93.7,
            phase: "Load, Heavy".into(),
        }];
        let text = render(|buf| write_data_table(buf, &samples));
        assert_eq!(
            text,
            "ElapsedSeconds,PowerMW,ThroughputTotalMbps,Phase\n1.5,4200.0,93.7,Load; Heavy\n"
        );
    }

    #[test]
    fn phases_table_sanitizes_labels() {
        let events = vec![PhaseEvent {
            row: 4,
            elapsed: 12.0,
            transition: PhaseTransition::Phase("Load, Heavy".into()),
        }];
        let text = render(|buf| write_phases_table(buf, &events));
        assert_eq!(text, "PhaseStartSeconds,PhaseName\n12.0,Load; Heavy\n");
    }

    #[test]
    fn stats_table_precision() {
        let phases = vec![PhaseSummary {
            label: "load".into(),
            stats: PhaseStats {
                avg_power_mw: 5000.04,
                std_power_mw: 12.345,
                min_power_mw: 4980.0,
                max_power_mw: 5020.0,
                avg_throughput_mbps: 899.96,
                std_throughput_mbps: 0.0,
                duration_s: 59.6,
                count: 61,
                efficiency_mbps_per_w: 179.99,
            },
        }];
        let text = render(|buf| write_stats_table(buf, &phases));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], STATS_HEADER.join(","));
        assert_eq!(lines[1], "load,5000.0,12.3,4980.0,5020.0,900.0,0.0,60,61,179.99");
    }

    #[test]
    fn interface_table_layout() {
        let table = InterfaceTable {
            names: vec!["eth0".into(), "eth1".into()],
            rows: vec![InterfaceRow {
                elapsed: "0".into(),
                values: vec!["1.0".into(), "2".into()],
            }],
        };
        let text = render(|buf| write_interface_table(buf, &table));
        assert_eq!(
            text,
            "ElapsedSeconds,Throughput_eth0_Mbps,Throughput_eth1_Mbps\n0,1.0,2\n"
        );
    }
}
