//! Ledger record types: transactions and receipts as read from the ledger store.
//!
//! These are snapshots. Nothing in this workspace mutates or persists them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// Tag marking a transaction whose amount is a full asset acquisition cost
pub const DEPRECIATION_ASSET_TAG: &str = "depreciation-asset";

/// A ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub amount: Amount,
    /// Declared entry kind; some records omit it entirely
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl LedgerTransaction {
    /// Create a transaction with no kind, status, tags or description
    pub fn new(date: NaiveDate, amount: impl Into<Amount>) -> Self {
        Self {
            id: None,
            date,
            amount: amount.into(),
            kind: None,
            approval_status: None,
            tags: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_status(mut self, status: ApprovalStatus) -> Self {
        self.approval_status = Some(status);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when the amount is an acquisition cost to be replaced by the
    /// period depreciation found in the description
    pub fn is_depreciation_asset(&self) -> bool {
        self.has_tag(DEPRECIATION_ASSET_TAG)
    }

    pub fn is_rejected(&self) -> bool {
        self.approval_status == Some(ApprovalStatus::Rejected)
    }
}

/// Declared kind of a ledger transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryKind {
    Income,
    Expense,
    /// Any other label; classification falls back to the amount's sign
    Other(String),
}

impl From<&str> for EntryKind {
    fn from(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "income" => EntryKind::Income,
            "expense" => EntryKind::Expense,
            _ => EntryKind::Other(label.trim().to_string()),
        }
    }
}

impl From<String> for EntryKind {
    fn from(label: String) -> Self {
        EntryKind::from(label.as_str())
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Income => "income".to_string(),
            EntryKind::Expense => "expense".to_string(),
            EntryKind::Other(label) => label,
        }
    }
}

/// Review state of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Approved,
    Pending,
    Rejected,
    #[serde(other)]
    Other,
}

impl From<&str> for ApprovalStatus {
    fn from(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "approved" => ApprovalStatus::Approved,
            "pending" => ApprovalStatus::Pending,
            "rejected" => ApprovalStatus::Rejected,
            _ => ApprovalStatus::Other,
        }
    }
}

/// A captured receipt awaiting (or past) review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub amount: Amount,
    pub status: ReceiptStatus,
    /// Transaction this receipt was converted into, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl ReceiptRecord {
    pub fn new(date: NaiveDate, amount: impl Into<Amount>, status: ReceiptStatus) -> Self {
        Self {
            id: None,
            date,
            amount: amount.into(),
            status,
            transaction_id: None,
        }
    }

    pub fn linked_to(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReceiptStatus::Pending
    }
}

/// Review state of a receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Other,
}

impl From<&str> for ReceiptStatus {
    fn from(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "pending" => ReceiptStatus::Pending,
            "approved" => ReceiptStatus::Approved,
            "rejected" => ReceiptStatus::Rejected,
            _ => ReceiptStatus::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transaction_builder() {
        let txn = LedgerTransaction::new(date(2025, 3, 1), "¥1,200,000")
            .with_kind(EntryKind::Expense)
            .with_tag(DEPRECIATION_ASSET_TAG)
            .with_description("PC");
        assert!(txn.is_depreciation_asset());
        assert!(!txn.is_rejected());
        assert_eq!(txn.year(), 2025);
        assert_eq!(txn.amount.normalize(), 1_200_000.0);
    }

    #[test]
    fn test_entry_kind_labels() {
        assert_eq!(EntryKind::from("Income"), EntryKind::Income);
        assert_eq!(EntryKind::from(" expense "), EntryKind::Expense);
        assert_eq!(EntryKind::from("transfer"), EntryKind::Other("transfer".into()));
    }

    #[test]
    fn test_deserialize_loose_transaction() {
        let json = r#"{
            "date": "2025-04-01",
            "amount": {"value": "¥50,000"},
            "type": "income",
            "approvalStatus": "rejected"
        }"#;
        let txn: LedgerTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, Some(EntryKind::Income));
        assert!(txn.is_rejected());
        assert!(txn.tags.is_empty());
        assert_eq!(txn.amount.normalize(), 50_000.0);
    }

    #[test]
    fn test_unknown_status_labels() {
        let txn: LedgerTransaction =
            serde_json::from_str(r#"{"date": "2025-01-01", "amount": 1, "approvalStatus": "draft"}"#)
                .unwrap();
        assert_eq!(txn.approval_status, Some(ApprovalStatus::Other));

        let receipt: ReceiptRecord =
            serde_json::from_str(r#"{"date": "2025-01-01", "amount": 1, "status": "archived"}"#)
                .unwrap();
        assert_eq!(receipt.status, ReceiptStatus::Other);
        assert!(!receipt.is_pending());
    }

    #[test]
    fn test_receipt_link_roundtrips_as_camel_case() {
        let receipt = ReceiptRecord::new(date(2025, 5, 2), 3_300.0, ReceiptStatus::Pending)
            .linked_to("txn-9");
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["transactionId"], "txn-9");
        assert_eq!(json["status"], "pending");
    }
}
