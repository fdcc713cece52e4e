//! Entry points: ledger snapshot in, [`EstimationResult`] out.
//!
//! Pipeline per call:
//! 1. detect selectable years and resolve the target year
//! 2. aggregate year-to-date income/expense
//! 3. annualize profit by elapsed months
//! 4. run the regime's bracket calculator
//! 5. assemble the result and chart series
//!
//! Every call recomputes from scratch. Inputs are borrowed and never mutated.

use serde::{Deserialize, Serialize};
use tracing::debug;

use taxcast_core::{resolve_year, selectable_years, Clock, LedgerTransaction, ReceiptRecord};

use crate::aggregate::{aggregate_ledger, DepreciationEntry, LedgerTotals};
use crate::breakdown::{Breakdown, ChartSeries};
use crate::corporate::calculate_corporate_tax;
use crate::individual::{calculate_individual_tax, Deductions};
use crate::projection::{months_passed, project_annual};

/// Taxpayer regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Individual,
    Corporate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualOptions {
    /// Target fiscal year; defaults to the detected year
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub enable_blue_return_deduction: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateOptions {
    #[serde(default)]
    pub year: Option<i32>,
}

/// Projected annual tax liability and its components
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub regime: Regime,
    pub total_tax: f64,
    pub monthly_tax_equivalent: f64,
    pub year_to_date_profit: f64,
    pub projected_annual_profit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deductions: Option<Deductions>,
    pub breakdown: Breakdown,
    pub year_to_date_income: f64,
    pub year_to_date_expense: f64,
    pub calculation_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectable_years: Option<Vec<i32>>,
    pub months_passed: u32,
    pub chart: ChartSeries,
    /// Depreciable assets and what each contributed to expense
    pub depreciation: Vec<DepreciationEntry>,
}

/// Individual-only fields
struct IndividualExtras {
    taxable_income: f64,
    deductions: Deductions,
    selectable_years: Vec<i32>,
}

impl EstimationResult {
    fn assemble(
        regime: Regime,
        totals: LedgerTotals,
        months_passed: u32,
        projected_annual_profit: f64,
        breakdown: Breakdown,
        extras: Option<IndividualExtras>,
    ) -> Self {
        let total_tax = breakdown.total().max(0.0);
        let chart = breakdown.chart();
        let (taxable_income, deductions, selectable_years) = match extras {
            Some(e) => (
                Some(e.taxable_income),
                Some(e.deductions),
                Some(e.selectable_years),
            ),
            None => (None, None, None),
        };

        Self {
            regime,
            total_tax,
            monthly_tax_equivalent: total_tax / 12.0,
            year_to_date_profit: totals.profit(),
            projected_annual_profit,
            taxable_income,
            deductions,
            breakdown,
            year_to_date_income: totals.income,
            year_to_date_expense: totals.expense(),
            calculation_year: totals.year,
            selectable_years,
            months_passed,
            chart,
            depreciation: totals.depreciation,
        }
    }
}

/// Steps shared by both regimes: year resolution, aggregation, projection.
struct Projection {
    years: Vec<i32>,
    totals: LedgerTotals,
    months: u32,
    annual_profit: f64,
}

fn project(
    transactions: &[LedgerTransaction],
    receipts: &[ReceiptRecord],
    requested_year: Option<i32>,
    clock: &impl Clock,
) -> Projection {
    let today = clock.today();
    let years = selectable_years(transactions, receipts, today);
    let year = resolve_year(requested_year, &years, today);

    let totals = aggregate_ledger(transactions, receipts, year);
    let months = months_passed(year, today);
    let annual_profit = project_annual(totals.profit(), months);

    debug!(
        %today,
        year,
        months,
        ytd_profit = totals.profit(),
        annual_profit,
        "projected annual profit"
    );

    Projection {
        years,
        totals,
        months,
        annual_profit,
    }
}

/// Estimate a sole proprietor's annual tax from a ledger snapshot.
pub fn estimate_individual_tax(
    transactions: &[LedgerTransaction],
    receipts: &[ReceiptRecord],
    options: &IndividualOptions,
    clock: &impl Clock,
) -> EstimationResult {
    let p = project(transactions, receipts, options.year, clock);
    let tax = calculate_individual_tax(p.annual_profit, options.enable_blue_return_deduction);

    EstimationResult::assemble(
        Regime::Individual,
        p.totals,
        p.months,
        p.annual_profit,
        tax.breakdown(),
        Some(IndividualExtras {
            taxable_income: tax.taxable_income,
            deductions: tax.deductions,
            selectable_years: p.years,
        }),
    )
}

/// Estimate a corporation's annual tax from a ledger snapshot.
pub fn estimate_corporate_tax(
    transactions: &[LedgerTransaction],
    receipts: &[ReceiptRecord],
    options: &CorporateOptions,
    clock: &impl Clock,
) -> EstimationResult {
    let p = project(transactions, receipts, options.year, clock);
    let tax = calculate_corporate_tax(p.annual_profit);

    EstimationResult::assemble(
        Regime::Corporate,
        p.totals,
        p.months,
        p.annual_profit,
        tax.breakdown(),
        None,
    )
}
