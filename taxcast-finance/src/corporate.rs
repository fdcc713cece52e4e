//! Corporation tax estimate: corporate, inhabitant and enterprise tax.

use crate::breakdown::{Breakdown, Levy};

pub const CORPORATE_REDUCED_LIMIT: f64 = 8_000_000.0;
pub const CORPORATE_REDUCED_RATE: f64 = 0.15;
pub const CORPORATE_STANDARD_RATE: f64 = 0.232;

pub const INHABITANT_TAX_RATE: f64 = 0.129;
/// Per-entity flat levy added to the inhabitant tax
pub const INHABITANT_PER_CAPITA: f64 = 70_000.0;

/// Enterprise tax slices: (upper bound of slice, rate)
const ENTERPRISE_TAX_TIERS: [(f64, f64); 3] = [
    (4_000_000.0, 0.035),
    (8_000_000.0, 0.053),
    (f64::INFINITY, 0.070),
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CorporateTax {
    pub corporate_tax: f64,
    pub inhabitant_tax: f64,
    pub enterprise_tax: f64,
}

impl CorporateTax {
    pub fn total(&self) -> f64 {
        self.breakdown().total()
    }

    pub fn breakdown(&self) -> Breakdown {
        Breakdown::new(vec![
            (Levy::CorporateTax, self.corporate_tax),
            (Levy::InhabitantTax, self.inhabitant_tax),
            (Levy::EnterpriseTax, self.enterprise_tax),
        ])
    }
}

/// Estimate a corporation's levies on a projected annual profit.
///
/// A non-positive profit owes nothing, including the per-entity levy.
pub fn calculate_corporate_tax(projected_profit: f64) -> CorporateTax {
    if projected_profit <= 0.0 {
        return CorporateTax::default();
    }

    let corporate_tax = corporate_tax(projected_profit);
    CorporateTax {
        corporate_tax,
        inhabitant_tax: corporate_tax * INHABITANT_TAX_RATE + INHABITANT_PER_CAPITA,
        enterprise_tax: enterprise_tax(projected_profit),
    }
}

/// Two-tier corporate tax.
pub fn corporate_tax(profit: f64) -> f64 {
    if profit <= 0.0 {
        0.0
    } else if profit <= CORPORATE_REDUCED_LIMIT {
        profit * CORPORATE_REDUCED_RATE
    } else {
        CORPORATE_REDUCED_LIMIT * CORPORATE_REDUCED_RATE
            + (profit - CORPORATE_REDUCED_LIMIT) * CORPORATE_STANDARD_RATE
    }
}

/// Enterprise tax, each slice taxed at its own rate.
pub fn enterprise_tax(profit: f64) -> f64 {
    let mut tax = 0.0;
    let mut floor = 0.0;
    for (ceiling, rate) in ENTERPRISE_TAX_TIERS {
        if profit <= floor {
            break;
        }
        tax += (profit.min(ceiling) - floor) * rate;
        floor = ceiling;
    }
    tax
}
