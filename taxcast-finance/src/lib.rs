//! taxcast-finance: ledger aggregation, annualization and bracket calculators

pub mod aggregate;
pub mod breakdown;
pub mod corporate;
pub mod depreciation;
pub mod estimate;
pub mod individual;
pub mod projection;

pub use aggregate::{aggregate_ledger, classify, Classification, DepreciationEntry, LedgerTotals};
pub use breakdown::{Breakdown, ChartSeries, Levy};
pub use corporate::{calculate_corporate_tax, CorporateTax};
pub use depreciation::{describe_asset, period_depreciation, AcquisitionCost, AssetNote, ExtractionRule};
pub use estimate::{
    estimate_corporate_tax, estimate_individual_tax, CorporateOptions, EstimationResult,
    IndividualOptions, Regime,
};
pub use individual::{calculate_individual_tax, Deductions, IndividualTax};
pub use projection::{months_passed, project_annual};
