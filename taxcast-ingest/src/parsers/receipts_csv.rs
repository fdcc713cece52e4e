//! Receipts from CSV.
//!
//! Header: date,amount,status[,transaction_id][,id]

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use taxcast_core::{Amount, ReceiptRecord, ReceiptStatus};

use super::{non_empty, read_rows};
use crate::dates::parse_record_date;

#[derive(Debug, Deserialize)]
struct ReceiptRow {
    date: String,
    #[serde(default)]
    amount: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    transaction_id: String,
    #[serde(default)]
    id: String,
}

/// Parse a receipts CSV file.
pub fn parse_receipts_csv(path: impl AsRef<Path>) -> Result<Vec<ReceiptRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_receipts_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse receipts CSV from any reader.
pub fn read_receipts_csv(reader: impl Read) -> Result<Vec<ReceiptRecord>> {
    let mut receipts = Vec::new();
    for (line, row) in read_rows::<ReceiptRow>(reader, "receipt")? {
        let Some(date) = parse_record_date(&row.date) else {
            warn!(line, date = %row.date, "skipping receipt row with unreadable date");
            continue;
        };

        receipts.push(ReceiptRecord {
            id: non_empty(&row.id).map(str::to_string),
            date,
            amount: Amount::from(row.amount),
            status: ReceiptStatus::from(row.status.as_str()),
            transaction_id: non_empty(&row.transaction_id).map(str::to_string),
        });
    }

    Ok(receipts)
}
