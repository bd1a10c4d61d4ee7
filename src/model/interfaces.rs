use crate::Result;
use crate::columns::{self, ColumnMap};
use crate::rawlog::RawRecord;

/// Per-interface throughput, passed through as text.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceTable {
    /// Interface names in lexicographic order.
    pub names: Vec<String>,
    pub rows: Vec<InterfaceRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRow {
    pub elapsed: String,
    /// One value per entry of `InterfaceTable::names`.
    pub values: Vec<String>,
}

pub fn interface_column_name(iface: &str) -> String {
    format!("Throughput_{}_Mbps", iface)
}

/// `None` when the header has no interface columns.
pub fn build_interface_table(rows: &[RawRecord], cols: &ColumnMap) -> Result<Option<InterfaceTable>> {
    if cols.interfaces.is_empty() {
        return Ok(None);
    }

    let names: Vec<String> = cols.interfaces.keys().cloned().collect();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let elapsed = row.field(cols.elapsed, columns::ELAPSED)?.to_string();
        let mut values = Vec::with_capacity(names.len());
        for (name, &idx) in &cols.interfaces {
            values.push(row.field(idx, &interface_column_name(name))?.to_string());
        }
        out.push(InterfaceRow { elapsed, values });
    }

    Ok(Some(InterfaceTable { names, rows: out }))
}
