//! Dashboard parameters and the pure recompute of derived views.

use serde::{Deserialize, Serialize};

use crate::analytics::{self, RecordQuery};
use crate::config;
use crate::models::{
    AggregateResult, ChartData, ChartKind, ComparisonOutcome, ComparisonSpec, FilterCriteria,
    ForecastPoint, Overview, RollupRow, SalesRecord,
};

// ---------------------------------------------------------------------------
// DashboardParams
// ---------------------------------------------------------------------------

/// Every user-controlled input of the dashboard.
///
/// Treated as an immutable value: a UI layer builds a new one on each change
/// and hands it to [`Dashboard::set_params`](crate::Dashboard::set_params).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardParams {
    pub year: i32,
    #[serde(default)]
    pub filters: FilterCriteria,
    #[serde(default)]
    pub chart: ChartKind,
    #[serde(default)]
    pub comparison: ComparisonSpec,
    #[serde(default = "default_horizon")]
    pub forecast_horizon: usize,
}

fn default_horizon() -> usize {
    config::DEFAULT_FORECAST_HORIZON
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            year: config::DEFAULT_YEAR,
            filters: FilterCriteria::default(),
            chart: ChartKind::default(),
            comparison: ComparisonSpec::default(),
            forecast_horizon: config::DEFAULT_FORECAST_HORIZON,
        }
    }
}

impl DashboardParams {
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, filters: FilterCriteria) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_chart(mut self, chart: ChartKind) -> Self {
        self.chart = chart;
        self
    }

    pub fn with_comparison(mut self, comparison: ComparisonSpec) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_forecast_horizon(mut self, horizon: usize) -> Self {
        self.forecast_horizon = horizon;
        self
    }

    /// Years whose records must be in the pool for these parameters.
    ///
    /// The selected year, plus both comparison years when comparison is
    /// enabled. Sorted and de-duplicated.
    pub fn required_years(&self) -> Vec<i32> {
        let mut years = vec![self.year];
        if self.comparison.enabled {
            years.push(self.comparison.period1.year);
            years.push(self.comparison.period2.year);
        }
        years.sort_unstable();
        years.dedup();
        years
    }
}

// ---------------------------------------------------------------------------
// DerivedViews
// ---------------------------------------------------------------------------

/// Everything the dashboard renders, derived from a record pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedViews {
    /// Records of the selected year before filtering.
    pub year_record_count: usize,
    /// Records of the selected year passing the filters.
    pub filtered: Vec<SalesRecord>,
    pub summary: AggregateResult,
    pub by_region: Vec<RollupRow>,
    pub by_product: Vec<RollupRow>,
    pub comparison: Option<ComparisonOutcome>,
    pub overview: Option<Overview>,
    pub forecast: Vec<ForecastPoint>,
    pub chart: ChartData,
}

impl DerivedViews {
    /// Whether there is nothing to chart for the current parameters.
    pub fn is_empty(&self) -> bool {
        self.comparison.is_none() && self.filtered.is_empty()
    }

    /// Notice to show instead of (or above) the chart, if any.
    pub fn notice(&self, params: &DashboardParams) -> Option<String> {
        if let Some(outcome) = &self.comparison {
            if let Some(msg) = outcome.availability().message(&params.comparison) {
                return Some(msg);
            }
            return self.chart.notice().map(str::to_string);
        }
        if self.filtered.is_empty() {
            return Some(
                "No data available for the selected filters. Try adjusting your criteria."
                    .to_string(),
            );
        }
        None
    }
}

/// Recompute every derived view from `pool` and `params`.
///
/// Pure: the same inputs always produce an equal result.
pub fn compute(pool: &[SalesRecord], params: &DashboardParams) -> DerivedViews {
    let query = RecordQuery::new(pool);
    let year_records = query.year(params.year);
    let filtered = analytics::filter_records(&year_records, &params.filters);

    let comparison = query.compare(&params.comparison, &params.filters);
    let chart = analytics::shape(params.chart, &filtered, comparison.as_ref());

    DerivedViews {
        year_record_count: year_records.len(),
        summary: analytics::aggregate(&filtered),
        by_region: query.by_region(params.year),
        by_product: query.by_product(params.year),
        overview: analytics::overview(&filtered, params.forecast_horizon),
        forecast: analytics::forecast(&filtered, params.forecast_horizon).collect(),
        comparison,
        chart,
        filtered,
    }
}
