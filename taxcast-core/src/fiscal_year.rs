//! Fiscal year detection from ledger data.
//!
//! The selectable years are whatever the ledger actually contains, plus the
//! current and prior calendar year so a fresh ledger still has something to
//! pick. Fiscal years are calendar years.

use chrono::{Datelike, NaiveDate};

use crate::ledger::{LedgerTransaction, ReceiptRecord};

/// Years a caller may pick, most recent first, without duplicates.
pub fn selectable_years(
    transactions: &[LedgerTransaction],
    receipts: &[ReceiptRecord],
    today: NaiveDate,
) -> Vec<i32> {
    let current = today.year();
    let mut years: Vec<i32> = [current, current - 1]
        .into_iter()
        .chain(transactions.iter().map(LedgerTransaction::year))
        .chain(receipts.iter().map(ReceiptRecord::year))
        .collect();

    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// The current year when selectable, else the most recent selectable year.
pub fn default_year(years: &[i32], today: NaiveDate) -> i32 {
    let current = today.year();
    if years.contains(&current) {
        current
    } else {
        years.first().copied().unwrap_or(current)
    }
}

/// An explicit `requested` year wins; it is not checked against `years`.
pub fn resolve_year(requested: Option<i32>, years: &[i32], today: NaiveDate) -> i32 {
    requested.unwrap_or_else(|| default_year(years, today))
}
