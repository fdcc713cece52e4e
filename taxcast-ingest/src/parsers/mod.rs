//! CSV ledger parsers.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::Read;

pub mod ledger_csv;
pub mod receipts_csv;

pub use ledger_csv::{parse_ledger_csv, read_ledger_csv};
pub use receipts_csv::{parse_receipts_csv, read_receipts_csv};

/// Empty CSV cells mean "not set"
fn non_empty(cell: &str) -> Option<&str> {
    let cell = cell.trim();
    if cell.is_empty() { None } else { Some(cell) }
}

/// Deserialize every data row together with the file line it starts on
/// (the header is line 1).
fn read_rows<T: DeserializeOwned>(reader: impl Read, what: &str) -> Result<Vec<(u64, T)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .with_context(|| format!("{what} header"))?
        .clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.with_context(|| format!("{what} CSV"))?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record
            .deserialize(Some(&headers))
            .with_context(|| format!("{what} line {line}"))?;
        rows.push((line, row));
    }
    Ok(rows)
}
