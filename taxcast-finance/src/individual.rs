//! Sole-proprietor tax estimate.
//!
//! Four levies, each with its own base:
//! - income tax: progressive schedule on taxable income (profit less deductions)
//! - resident tax: flat 10% of taxable income
//! - business tax: 5% of profit above its own 2.9M exemption
//! - national health insurance: 10% of profit, capped

use serde::Serialize;

use crate::breakdown::{Breakdown, Levy};

pub const BASIC_DEDUCTION: f64 = 480_000.0;
pub const BLUE_RETURN_DEDUCTION: f64 = 650_000.0;

pub const RESIDENT_TAX_RATE: f64 = 0.10;

pub const BUSINESS_TAX_EXEMPTION: f64 = 2_900_000.0;
pub const BUSINESS_TAX_RATE: f64 = 0.05;

pub const HEALTH_INSURANCE_RATE: f64 = 0.10;
pub const HEALTH_INSURANCE_CAP: f64 = 800_000.0;

/// Income tax schedule: (inclusive upper bound, marginal rate, subtraction).
///
/// Tax is `taxable * rate - subtraction` for the first tier whose bound
/// covers the taxable income.
const INCOME_TAX_BRACKETS: [(f64, f64, f64); 6] = [
    (1_950_000.0, 0.05, 0.0),
    (3_300_000.0, 0.10, 97_500.0),
    (6_950_000.0, 0.20, 427_500.0),
    (9_000_000.0, 0.23, 636_000.0),
    (18_000_000.0, 0.33, 1_536_000.0),
    (f64::INFINITY, 0.40, 2_796_000.0),
];

/// Deductions applied before income and resident tax
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deductions {
    pub basic: f64,
    pub blue_return: f64,
    pub total: f64,
}

impl Deductions {
    pub fn new(enable_blue_return: bool) -> Self {
        let blue_return = if enable_blue_return {
            BLUE_RETURN_DEDUCTION
        } else {
            0.0
        };
        Self {
            basic: BASIC_DEDUCTION,
            blue_return,
            total: BASIC_DEDUCTION + blue_return,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndividualTax {
    pub deductions: Deductions,
    pub taxable_income: f64,
    pub income_tax: f64,
    pub resident_tax: f64,
    pub business_tax: f64,
    pub health_insurance: f64,
}

impl IndividualTax {
    /// Sum of the four levies
    pub fn total(&self) -> f64 {
        self.breakdown().total().max(0.0)
    }

    pub fn breakdown(&self) -> Breakdown {
        Breakdown::new(vec![
            (Levy::IncomeTax, self.income_tax),
            (Levy::ResidentTax, self.resident_tax),
            (Levy::BusinessTax, self.business_tax),
            (Levy::HealthInsurance, self.health_insurance),
        ])
    }
}

/// Estimate a sole proprietor's levies on a projected annual profit.
/// Non-positive profit yields zero for every levy.
pub fn calculate_individual_tax(projected_profit: f64, enable_blue_return: bool) -> IndividualTax {
    let profit = projected_profit.max(0.0);
    let deductions = Deductions::new(enable_blue_return);
    let taxable_income = (profit - deductions.total).max(0.0);

    IndividualTax {
        deductions,
        taxable_income,
        income_tax: income_tax(taxable_income),
        resident_tax: taxable_income * RESIDENT_TAX_RATE,
        business_tax: (profit - BUSINESS_TAX_EXEMPTION).max(0.0) * BUSINESS_TAX_RATE,
        health_insurance: (profit * HEALTH_INSURANCE_RATE).min(HEALTH_INSURANCE_CAP),
    }
}

/// Progressive income tax on `taxable_income`.
pub fn income_tax(taxable_income: f64) -> f64 {
    if taxable_income <= 0.0 {
        return 0.0;
    }
    INCOME_TAX_BRACKETS
        .iter()
        .find(|(bound, _, _)| taxable_income <= *bound)
        .map(|(_, rate, subtraction)| (taxable_income * rate - subtraction).max(0.0))
        .unwrap_or(0.0)
}
