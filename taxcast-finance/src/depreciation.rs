//! Period depreciation embedded in asset transaction descriptions.
//!
//! A transaction tagged `depreciation-asset` records the full acquisition
//! cost, but only the current period's depreciation is an expense. The
//! bookkeeping screens write that figure into the description in one of two
//! formats:
//!
//! ```text
//! 2025年度償却額: ¥100,000 / 取得価額: ¥1,200,000   (fiscal-year format)
//! 当期償却額: ¥100,000                               (legacy format)
//! ```
//!
//! Extraction tries [`EXTRACTION_ORDER`] first to last. The last rule always
//! matches and falls back to the recorded amount, which overstates the
//! expense for multi-year assets. That imprecision is accepted.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use taxcast_core::{Amount, LedgerTransaction};

static FISCAL_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<year>[0-9]{4})\s*年度償却額\s*[:：]\s*[¥￥]?\s*(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)")
        .expect("fiscal-year depreciation pattern")
});

static LEGACY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"当期償却額\s*[:：]\s*[¥￥]?\s*(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)")
        .expect("legacy depreciation pattern")
});

static ACQUISITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"取得価額\s*[:：]\s*[¥￥]?\s*(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)")
        .expect("acquisition cost pattern")
});

/// Where a period depreciation figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractionRule {
    /// `<year>年度償却額`, only for the year being estimated
    FiscalYear,
    /// `当期償却額`
    Legacy,
    /// No embedded figure; the recorded acquisition cost is used as-is
    RawAmount,
}

/// Rules in priority order
pub const EXTRACTION_ORDER: [ExtractionRule; 3] = [
    ExtractionRule::FiscalYear,
    ExtractionRule::Legacy,
    ExtractionRule::RawAmount,
];

impl ExtractionRule {
    fn apply(self, txn: &LedgerTransaction, year: i32) -> Option<f64> {
        match self {
            ExtractionRule::FiscalYear => fiscal_year_amount(&txn.description, year),
            ExtractionRule::Legacy => legacy_amount(&txn.description),
            ExtractionRule::RawAmount => Some(txn.amount.magnitude()),
        }
    }
}

/// Depreciation counted toward expense for one asset transaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDepreciation {
    pub amount: f64,
    pub rule: ExtractionRule,
}

/// Current-period depreciation for `txn` in fiscal `year`.
pub fn period_depreciation(txn: &LedgerTransaction, year: i32) -> PeriodDepreciation {
    EXTRACTION_ORDER
        .iter()
        .find_map(|&rule| {
            rule.apply(txn, year)
                .map(|amount| PeriodDepreciation { amount, rule })
        })
        .unwrap_or(PeriodDepreciation {
            amount: txn.amount.magnitude(),
            rule: ExtractionRule::RawAmount,
        })
}

/// Acquisition cost as shown next to an asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "amount")]
pub enum AcquisitionCost {
    Known(f64),
    /// Not written in the description; never guessed
    Unknown,
}

/// What the description says about a depreciable asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetNote {
    /// Embedded period depreciation, `None` when neither format matched
    pub period: Option<PeriodDepreciation>,
    pub acquisition_cost: AcquisitionCost,
}

/// Read the embedded figures from an asset description.
///
/// Descriptions carrying a period amount but no `取得価額` report
/// [`AcquisitionCost::Unknown`].
pub fn describe_asset(description: &str, year: i32) -> AssetNote {
    let period = fiscal_year_amount(description, year)
        .map(|amount| PeriodDepreciation {
            amount,
            rule: ExtractionRule::FiscalYear,
        })
        .or_else(|| {
            legacy_amount(description).map(|amount| PeriodDepreciation {
                amount,
                rule: ExtractionRule::Legacy,
            })
        });

    let acquisition_cost = ACQUISITION_RE
        .captures(description)
        .map(|caps| AcquisitionCost::Known(parse_yen(&caps["amount"])))
        .unwrap_or(AcquisitionCost::Unknown);

    AssetNote {
        period,
        acquisition_cost,
    }
}

fn fiscal_year_amount(description: &str, year: i32) -> Option<f64> {
    FISCAL_YEAR_RE
        .captures_iter(description)
        .find(|caps| caps["year"].parse::<i32>().ok() == Some(year))
        .map(|caps| parse_yen(&caps["amount"]))
}

fn legacy_amount(description: &str) -> Option<f64> {
    LEGACY_RE
        .captures(description)
        .map(|caps| parse_yen(&caps["amount"]))
}

fn parse_yen(digits: &str) -> f64 {
    Amount::from(digits).magnitude()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taxcast_core::{EntryKind, DEPRECIATION_ASSET_TAG};

    fn asset(description: &str) -> LedgerTransaction {
        LedgerTransaction::new(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), -1_200_000.0)
            .with_kind(EntryKind::Expense)
            .with_tag(DEPRECIATION_ASSET_TAG)
            .with_description(description)
    }

    #[test]
    fn test_fiscal_year_format() {
        let txn = asset("ノートPC 2025年度償却額: ¥100,000 / 取得価額: ¥1,200,000");
        let dep = period_depreciation(&txn, 2025);
        assert_eq!(dep.amount, 100_000.0);
        assert_eq!(dep.rule, ExtractionRule::FiscalYear);
    }

    #[test]
    fn test_fiscal_year_format_picks_matching_year() {
        let txn = asset("2024年度償却額：￥150,000 2025年度償却額：￥300,000");
        assert_eq!(period_depreciation(&txn, 2025).amount, 300_000.0);
        assert_eq!(period_depreciation(&txn, 2024).amount, 150_000.0);
    }

    #[test]
    fn test_fiscal_year_format_beats_legacy() {
        let txn = asset("当期償却額: ¥90,000 2025年度償却額: ¥100,000");
        let dep = period_depreciation(&txn, 2025);
        assert_eq!(dep.amount, 100_000.0);
        assert_eq!(dep.rule, ExtractionRule::FiscalYear);
    }

    #[test]
    fn test_legacy_format() {
        let txn = asset("複合機 当期償却額: 80,000");
        let dep = period_depreciation(&txn, 2025);
        assert_eq!(dep.amount, 80_000.0);
        assert_eq!(dep.rule, ExtractionRule::Legacy);
    }

    #[test]
    fn test_other_year_falls_through_to_legacy() {
        let txn = asset("2023年度償却額: ¥50,000 当期償却額: ¥70,000");
        assert_eq!(period_depreciation(&txn, 2025).rule, ExtractionRule::Legacy);
    }

    #[test]
    fn test_full_width_digits_fall_back_to_recorded_amount() {
        let txn = asset("当期償却額：￥１２０，０００");
        let dep = period_depreciation(&txn, 2025);
        assert_eq!(dep.amount, 1_200_000.0);
        assert_eq!(dep.rule, ExtractionRule::RawAmount);

        let txn = asset("２０２５年度償却額：￥１００，０００ / 取得価額：￥１，２００，０００");
        assert_eq!(period_depreciation(&txn, 2025).rule, ExtractionRule::RawAmount);
        assert!(describe_asset(&txn.description, 2025).period.is_none());
    }

    #[test]
    fn test_no_embedded_amount_uses_recorded_amount() {
        let txn = asset("社用車");
        let dep = period_depreciation(&txn, 2025);
        assert_eq!(dep.amount, 1_200_000.0);
        assert_eq!(dep.rule, ExtractionRule::RawAmount);
    }

    #[test]
    fn test_describe_asset_known_cost() {
        let note = describe_asset("2025年度償却額: ¥100,000 / 取得価額: ¥1,200,000", 2025);
        assert_eq!(note.acquisition_cost, AcquisitionCost::Known(1_200_000.0));
        assert_eq!(note.period.map(|p| p.amount), Some(100_000.0));
    }

    #[test]
    fn test_describe_asset_without_cost_is_unknown() {
        let note = describe_asset("当期償却額: ¥100,000", 2025);
        assert_eq!(note.acquisition_cost, AcquisitionCost::Unknown);
        assert_eq!(note.period.map(|p| p.rule), Some(ExtractionRule::Legacy));
    }

    #[test]
    fn test_describe_asset_plain_text() {
        let note = describe_asset("office chair", 2025);
        assert!(note.period.is_none());
        assert_eq!(note.acquisition_cost, AcquisitionCost::Unknown);
    }
}
