use serde::{Deserialize, Serialize};

use super::record::SalesRecord;

// ---------------------------------------------------------------------------
// AggregateResult — Summed sales/revenue over a record sequence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub total_sales: f64,
    pub total_revenue: f64,
    pub record_count: usize,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

// ---------------------------------------------------------------------------
// RollupKey / RollupRow — Grouped sums by region or product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupKey {
    Region,
    Product,
}

impl RollupKey {
    pub fn select<'r>(self, record: &'r SalesRecord) -> &'r str {
        match self {
            RollupKey::Region => &record.region,
            RollupKey::Product => &record.product,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupRow {
    pub key: String,
    pub sales: f64,
    pub revenue: f64,
    /// Number of records folded into this row.
    pub records: usize,
}

// ---------------------------------------------------------------------------
// ForecastPoint — One projected future period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub label: String,
    pub projected_sales: f64,
}

// ---------------------------------------------------------------------------
// Overview — Headline metrics for a filtered series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewTotals {
    pub sales: f64,
    pub revenue: f64,
    pub profit: f64,
    pub customers: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewAverages {
    pub sales: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub totals: OverviewTotals,
    pub averages: OverviewAverages,
    /// First-to-last percentage change in sales across the series.
    pub growth_rate: f64,
    pub forecast: Vec<ForecastPoint>,
}
