//! Year-to-date income and expense from a ledger snapshot.
//!
//! Filtering rules:
//! - transactions: dated in the target year, approval status not `rejected`
//! - receipts: dated in the target year, status `pending`
//!
//! Approved receipts are assumed to already exist as transactions. A pending
//! receipt whose `transaction_id` names a retained transaction (same target
//! year, not rejected) is skipped as well, so a converted receipt is never
//! counted twice within one year.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use taxcast_core::{EntryKind, LedgerTransaction, ReceiptRecord};

use crate::depreciation::{period_depreciation, ExtractionRule};

/// How a transaction counts toward the year's totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Income,
    Expense,
    /// Zero amount with no declared kind
    Neither,
}

/// Declared kind wins; otherwise the sign of the amount decides.
pub fn classify(txn: &LedgerTransaction) -> Classification {
    let amount = txn.amount.normalize();
    match &txn.kind {
        Some(EntryKind::Income) => Classification::Income,
        Some(EntryKind::Expense) => Classification::Expense,
        _ if amount > 0.0 => Classification::Income,
        _ if amount < 0.0 => Classification::Expense,
        _ => Classification::Neither,
    }
}

/// A depreciable asset and the amount it contributed to expense
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub description: String,
    /// Recorded (acquisition) amount
    pub recorded: f64,
    /// Amount counted as this year's expense
    pub counted: f64,
    pub rule: ExtractionRule,
}

/// Year-to-date sums for one fiscal year
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub year: i32,
    pub income: f64,
    /// Expense from transactions, depreciation already applied
    pub transaction_expense: f64,
    /// Expense from pending receipts
    pub receipt_expense: f64,
    pub depreciation: Vec<DepreciationEntry>,
    /// Pending receipts skipped because they were converted into a transaction
    pub linked_receipts_skipped: usize,
}

impl LedgerTotals {
    pub fn expense(&self) -> f64 {
        self.transaction_expense + self.receipt_expense
    }

    /// Income minus expense, never below zero
    pub fn profit(&self) -> f64 {
        (self.income - self.expense()).max(0.0)
    }
}

/// Sum the snapshot's income and expense for `year`.
pub fn aggregate_ledger(
    transactions: &[LedgerTransaction],
    receipts: &[ReceiptRecord],
    year: i32,
) -> LedgerTotals {
    let mut totals = LedgerTotals {
        year,
        ..LedgerTotals::default()
    };

    let retained: Vec<&LedgerTransaction> = transactions
        .iter()
        .filter(|t| t.year() == year && !t.is_rejected())
        .collect();

    for txn in retained.iter().copied() {
        match classify(txn) {
            Classification::Income => totals.income += txn.amount.magnitude(),
            Classification::Expense if txn.is_depreciation_asset() => {
                let dep = period_depreciation(txn, year);
                totals.transaction_expense += dep.amount;
                totals.depreciation.push(DepreciationEntry {
                    transaction_id: txn.id.clone(),
                    description: txn.description.clone(),
                    recorded: txn.amount.magnitude(),
                    counted: dep.amount,
                    rule: dep.rule,
                });
            }
            Classification::Expense => totals.transaction_expense += txn.amount.magnitude(),
            Classification::Neither => {}
        }
    }

    let converted: HashSet<&str> = retained.iter().filter_map(|t| t.id.as_deref()).collect();

    for receipt in receipts
        .iter()
        .filter(|r| r.year() == year && r.is_pending())
    {
        if let Some(linked) = receipt.transaction_id.as_deref() {
            if converted.contains(linked) {
                debug!(receipt = ?receipt.id, transaction = linked, "receipt already recorded as transaction");
                totals.linked_receipts_skipped += 1;
                continue;
            }
        }
        totals.receipt_expense += receipt.amount.magnitude();
    }

    debug!(
        year,
        income = totals.income,
        expense = totals.expense(),
        depreciation_assets = totals.depreciation.len(),
        "aggregated ledger"
    );

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taxcast_core::{ApprovalStatus, ReceiptStatus, DEPRECIATION_ASSET_TAG};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_declared_kind_wins() {
        let refund = LedgerTransaction::new(date(2025, 1, 1), -500.0).with_kind(EntryKind::Income);
        assert_eq!(classify(&refund), Classification::Income);

        let expense = LedgerTransaction::new(date(2025, 1, 1), 500.0).with_kind(EntryKind::Expense);
        assert_eq!(classify(&expense), Classification::Expense);
    }

    #[test]
    fn test_classify_by_sign_when_kind_missing_or_unknown() {
        let positive = LedgerTransaction::new(date(2025, 1, 1), "¥1,000");
        assert_eq!(classify(&positive), Classification::Income);

        let negative = LedgerTransaction::new(date(2025, 1, 1), "▲1,000")
            .with_kind(EntryKind::from("transfer"));
        assert_eq!(classify(&negative), Classification::Expense);

        let zero = LedgerTransaction::new(date(2025, 1, 1), "n/a");
        assert_eq!(classify(&zero), Classification::Neither);
    }

    #[test]
    fn test_year_and_rejection_filters() {
        let txns = vec![
            LedgerTransaction::new(date(2025, 2, 1), 100_000.0),
            LedgerTransaction::new(date(2024, 12, 31), 900_000.0),
            LedgerTransaction::new(date(2025, 3, 1), 50_000.0).with_status(ApprovalStatus::Rejected),
            LedgerTransaction::new(date(2025, 3, 1), -30_000.0).with_status(ApprovalStatus::Pending),
        ];
        let totals = aggregate_ledger(&txns, &[], 2025);
        assert_eq!(totals.income, 100_000.0);
        assert_eq!(totals.expense(), 30_000.0);
        assert_eq!(totals.profit(), 70_000.0);
    }

    #[test]
    fn test_only_pending_receipts_count() {
        let receipts = vec![
            ReceiptRecord::new(date(2025, 5, 1), 1_000.0, ReceiptStatus::Pending),
            ReceiptRecord::new(date(2025, 5, 1), "-2,000", ReceiptStatus::Pending),
            ReceiptRecord::new(date(2025, 5, 1), 4_000.0, ReceiptStatus::Approved),
            ReceiptRecord::new(date(2025, 5, 1), 8_000.0, ReceiptStatus::Rejected),
            ReceiptRecord::new(date(2024, 5, 1), 16_000.0, ReceiptStatus::Pending),
        ];
        let totals = aggregate_ledger(&[], &receipts, 2025);
        assert_eq!(totals.receipt_expense, 3_000.0);
        assert_eq!(totals.transaction_expense, 0.0);
    }

    #[test]
    fn test_linked_pending_receipt_is_not_double_counted() {
        let txns = vec![LedgerTransaction::new(date(2025, 6, 1), -5_000.0).with_id("txn-1")];
        let receipts = vec![
            ReceiptRecord::new(date(2025, 6, 1), 5_000.0, ReceiptStatus::Pending).linked_to("txn-1"),
            ReceiptRecord::new(date(2025, 6, 2), 700.0, ReceiptStatus::Pending).linked_to("txn-missing"),
        ];
        let totals = aggregate_ledger(&txns, &receipts, 2025);
        assert_eq!(totals.expense(), 5_700.0);
        assert_eq!(totals.linked_receipts_skipped, 1);
    }

    #[test]
    fn test_link_to_rejected_transaction_still_counts_receipt() {
        let txns = vec![LedgerTransaction::new(date(2025, 6, 1), -5_000.0)
            .with_id("txn-1")
            .with_status(ApprovalStatus::Rejected)];
        let receipts =
            vec![ReceiptRecord::new(date(2025, 6, 1), 5_000.0, ReceiptStatus::Pending).linked_to("txn-1")];
        let totals = aggregate_ledger(&txns, &receipts, 2025);
        assert_eq!(totals.expense(), 5_000.0);
        assert_eq!(totals.linked_receipts_skipped, 0);
    }

    #[test]
    fn test_receipt_linked_to_prior_year_transaction_still_counts() {
        let txns = vec![LedgerTransaction::new(date(2024, 12, 20), -5_000.0).with_id("t-old")];
        let receipts =
            vec![ReceiptRecord::new(date(2025, 1, 5), 5_000.0, ReceiptStatus::Pending).linked_to("t-old")];

        let totals = aggregate_ledger(&txns, &receipts, 2025);
        assert_eq!(totals.expense(), 5_000.0);
        assert_eq!(totals.linked_receipts_skipped, 0);

        let prior = aggregate_ledger(&txns, &receipts, 2024);
        assert_eq!(prior.expense(), 5_000.0);
        assert_eq!(prior.receipt_expense, 0.0);
    }

    #[test]
    fn test_depreciation_asset_counts_period_amount() {
        let txns = vec![LedgerTransaction::new(date(2025, 4, 1), "¥1,200,000")
            .with_kind(EntryKind::Expense)
            .with_tag(DEPRECIATION_ASSET_TAG)
            .with_id("asset-1")
            .with_description("2025年度償却額: ¥100,000 / 取得価額: ¥1,200,000")];
        let totals = aggregate_ledger(&txns, &[], 2025);
        assert_eq!(totals.expense(), 100_000.0);
        assert_eq!(totals.depreciation.len(), 1);
        assert_eq!(totals.depreciation[0].recorded, 1_200_000.0);
        assert_eq!(totals.depreciation[0].counted, 100_000.0);
    }

    #[test]
    fn test_depreciation_tag_on_income_is_ignored() {
        let txns = vec![LedgerTransaction::new(date(2025, 4, 1), 300_000.0)
            .with_kind(EntryKind::Income)
            .with_tag(DEPRECIATION_ASSET_TAG)
            .with_description("当期償却額: ¥1")];
        let totals = aggregate_ledger(&txns, &[], 2025);
        assert_eq!(totals.income, 300_000.0);
        assert!(totals.depreciation.is_empty());
    }

    #[test]
    fn test_deficit_profit_is_zero() {
        let txns = vec![
            LedgerTransaction::new(date(2025, 1, 1), 100.0),
            LedgerTransaction::new(date(2025, 1, 2), -400.0),
        ];
        let totals = aggregate_ledger(&txns, &[], 2025);
        assert_eq!(totals.profit(), 0.0);
    }
}
