//! Ledger transactions from CSV.
//!
//! Header (column order free, `id` optional):
//!   date,amount,type,status,tags,description,id
//!
//! `tags` is `;`-separated. Amounts may be formatted (`"¥1,200,000"`, `▲3,000`).
//! Rows with an unreadable date are skipped.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use taxcast_core::{Amount, ApprovalStatus, EntryKind, LedgerTransaction};

use super::{non_empty, read_rows};
use crate::dates::parse_record_date;

#[derive(Debug, Deserialize)]
struct LedgerRow {
    date: String,
    #[serde(default)]
    amount: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    id: String,
}

/// Parse a ledger CSV file.
pub fn parse_ledger_csv(path: impl AsRef<Path>) -> Result<Vec<LedgerTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_ledger_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse ledger CSV from any reader.
pub fn read_ledger_csv(reader: impl Read) -> Result<Vec<LedgerTransaction>> {
    let mut txns = Vec::new();
    for (line, row) in read_rows::<LedgerRow>(reader, "ledger")? {
        let Some(date) = parse_record_date(&row.date) else {
            warn!(line, date = %row.date, "skipping ledger row with unreadable date");
            continue;
        };

        txns.push(LedgerTransaction {
            id: non_empty(&row.id).map(str::to_string),
            date,
            amount: Amount::from(row.amount),
            kind: non_empty(&row.kind).map(EntryKind::from),
            approval_status: non_empty(&row.status).map(ApprovalStatus::from),
            tags: row
                .tags
                .split(';')
                .filter_map(non_empty)
                .map(str::to_string)
                .collect(),
            description: row.description,
        });
    }

    Ok(txns)
}
