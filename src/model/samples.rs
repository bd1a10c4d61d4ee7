use crate::Result;
use crate::columns::{self, ColumnMap};
use crate::rawlog::RawRecord;

/// One cleaned measurement row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub elapsed: f64,
    pub power_mw: f64,
    pub throughput_mbps: f64,
    /// Trimmed phase column text; empty when the log has no phase column.
    pub phase: String,
}

/// Decode every row into a `Sample`, keeping file order. The first row whose
/// required fields are missing or non-numeric aborts the whole series.
pub fn clean_samples(rows: &[RawRecord], cols: &ColumnMap) -> Result<Vec<Sample>> {
    rows.iter()
        .map(|row| {
            let phase = match cols.phase {
                Some(idx) => row.field(idx, columns::PHASE)?.trim().to_string(),
                None => String::new(),
            };
            Ok(Sample {
                elapsed: row.number(cols.elapsed, columns::ELAPSED)?,
                power_mw: row.number(cols.power, columns::POWER)?,
                throughput_mbps: row.number(cols.throughput_total, columns::THROUGHPUT_TOTAL)?,
                phase,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn cols(phase: Option<usize>) -> ColumnMap {
        ColumnMap {
            elapsed: 0,
            power: 1,
            throughput_total: 2,
            phase,
            events: None,
            interfaces: BTreeMap::new(),
        }
    }

    fn row(line: usize, fields: &[&str]) -> RawRecord {
        RawRecord::new(line, fields.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn decodes_in_order() {
        let rows = vec![row(2, &["0", "1000", "0", " idle "]), row(3, &["1", "2000.5", "12", "load"])];
        let samples = clean_samples(&rows, &cols(Some(3))).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample { elapsed: 0.0, power_mw: 1000.0, throughput_mbps: 0.0, phase: "idle".into() },
                Sample { elapsed: 1.0, power_mw: 2000.5, throughput_mbps: 12.0, phase: "load".into() },
            ]
        );
    }

    #[test]
    fn absent_phase_column_gives_empty_text() {
        let samples = clean_samples(&[row(2, &["0", "1", "2"])], &cols(None)).unwrap();
        assert_eq!(samples[0].phase, "");
    }

    #[test]
    fn bad_number_reports_line() {
        let rows = vec![row(2, &["0", "1", "2"]), row(9, &["1", "n/a", "2"])];
        let err = clean_samples(&rows, &cols(None)).unwrap_err();
        match err.downcast_ref::<PipelineError>() {
            Some(PipelineError::MalformedRow { line, column, .. }) => {
                assert_eq!(*line, 9);
                assert_eq!(column, columns::POWER);
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }
}
