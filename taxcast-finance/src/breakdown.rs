//! Named tax components and the chart series derived from them.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One levy in a tax breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Levy {
    IncomeTax,
    ResidentTax,
    BusinessTax,
    HealthInsurance,
    CorporateTax,
    InhabitantTax,
    EnterpriseTax,
}

impl Levy {
    /// Display label used for chart legends and tables
    pub fn label(&self) -> &'static str {
        match self {
            Levy::IncomeTax => "Income tax",
            Levy::ResidentTax => "Resident tax",
            Levy::BusinessTax => "Business tax",
            Levy::HealthInsurance => "National health insurance",
            Levy::CorporateTax => "Corporate tax",
            Levy::InhabitantTax => "Inhabitant tax",
            Levy::EnterpriseTax => "Enterprise tax",
        }
    }
}

/// Levy amounts in a fixed, regime-specific order.
///
/// Serializes as a JSON object keyed by levy, preserving that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    entries: Vec<(Levy, f64)>,
}

impl Breakdown {
    pub fn new(entries: Vec<(Levy, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, levy: Levy) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| *l == levy)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Levy, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all components
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }

    pub fn chart(&self) -> ChartSeries {
        let (labels, values) = self
            .entries
            .iter()
            .map(|(levy, amount)| (levy.label().to_string(), *amount))
            .unzip();
        ChartSeries { labels, values }
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (levy, amount) in &self.entries {
            map.serialize_entry(levy, amount)?;
        }
        map.end()
    }
}

/// Parallel labels/values for a pie or donut chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}
