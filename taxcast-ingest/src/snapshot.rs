//! JSON ledger exports.
//!
//! Expected shape (keys camelCase, both arrays optional):
//!
//! ```json
//! {
//!   "transactions": [
//!     {"id": "t1", "date": "2025-04-01", "amount": "¥50,000", "type": "income",
//!      "approvalStatus": "approved", "tags": [], "description": "..."}
//!   ],
//!   "receipts": [
//!     {"date": "2025-04-03", "amount": 3300, "status": "pending", "transactionId": "t9"}
//!   ]
//! }
//! ```
//!
//! Records whose date cannot be read (missing, not a string, or in no known
//! format) are dropped with a warning. Other fields of the wrong JSON type
//! read as absent; amounts are passed through loosely and left to the
//! estimator's normalization.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

use taxcast_core::{
    Amount, ApprovalStatus, EntryKind, LedgerTransaction, ReceiptRecord, ReceiptStatus,
};

use crate::dates::parse_record_date;

/// Transactions and receipts read from one or more sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    pub transactions: Vec<LedgerTransaction>,
    pub receipts: Vec<ReceiptRecord>,
}

impl LedgerSnapshot {
    /// Append another source's records
    pub fn extend(&mut self, other: LedgerSnapshot) {
        self.transactions.extend(other.transactions);
        self.receipts.extend(other.receipts);
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.receipts.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    transactions: Vec<RawTransaction>,
    #[serde(default)]
    receipts: Vec<RawReceipt>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    amount: Amount,
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    approval_status: Option<Value>,
    #[serde(default)]
    tags: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    amount: Amount,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    transaction_id: Option<Value>,
}

/// Read and parse a JSON export from disk.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<LedgerSnapshot> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_snapshot(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parse a JSON export held in memory.
pub fn parse_snapshot(json: &str) -> Result<LedgerSnapshot> {
    let raw: RawSnapshot = serde_json::from_str(json).context("ledger snapshot JSON")?;

    let transactions = raw
        .transactions
        .into_iter()
        .enumerate()
        .filter_map(|(i, t)| convert_transaction(i, t))
        .collect();

    let receipts = raw
        .receipts
        .into_iter()
        .enumerate()
        .filter_map(|(i, r)| convert_receipt(i, r))
        .collect();

    Ok(LedgerSnapshot {
        transactions,
        receipts,
    })
}

fn convert_transaction(index: usize, raw: RawTransaction) -> Option<LedgerTransaction> {
    let Some(date) = text(&raw.date).and_then(parse_record_date) else {
        warn!(index, date = ?raw.date, "skipping transaction with unreadable date");
        return None;
    };

    Some(LedgerTransaction {
        id: raw.id.as_ref().and_then(id_string),
        date,
        amount: raw.amount,
        kind: text(&raw.kind).map(EntryKind::from),
        approval_status: text(&raw.approval_status).map(ApprovalStatus::from),
        tags: string_list(raw.tags),
        description: text(&raw.description).unwrap_or_default().to_string(),
    })
}

fn convert_receipt(index: usize, raw: RawReceipt) -> Option<ReceiptRecord> {
    let Some(date) = text(&raw.date).and_then(parse_record_date) else {
        warn!(index, date = ?raw.date, "skipping receipt with unreadable date");
        return None;
    };

    Some(ReceiptRecord {
        id: raw.id.as_ref().and_then(id_string),
        date,
        amount: raw.amount,
        status: text(&raw.status)
            .map(ReceiptStatus::from)
            .unwrap_or(ReceiptStatus::Other),
        transaction_id: raw.transaction_id.as_ref().and_then(id_string),
    })
}

/// String fields; any other JSON type reads as absent.
fn text(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

/// Tags keep only their string elements.
fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Ids arrive as strings or numbers depending on the exporter.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
