use serde::{Deserialize, Serialize};

use super::criteria::Selector;
use super::record::{Month, SalesRecord};

// ---------------------------------------------------------------------------
// PeriodSelector — A single (year, month) selection with optional filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSelector {
    pub year: i32,
    pub month: Month,
    #[serde(default)]
    pub region: Selector,
    #[serde(default)]
    pub product: Selector,
}

impl PeriodSelector {
    pub fn new(year: i32, month: Month) -> Self {
        Self {
            year,
            month,
            region: Selector::Any,
            product: Selector::Any,
        }
    }

    pub fn with_region(mut self, region: impl Into<Selector>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_product(mut self, product: impl Into<Selector>) -> Self {
        self.product = product.into();
        self
    }

    /// Display label, e.g. `"Jun 2024"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

// ---------------------------------------------------------------------------
// ComparisonSpec — Two periods plus mode flags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSpec {
    pub period1: PeriodSelector,
    pub period2: PeriodSelector,
    pub enabled: bool,
    /// When set, the period selectors' region/product are ignored in favour
    /// of the ambient filter criteria.
    pub use_global_filters: bool,
}

impl Default for ComparisonSpec {
    fn default() -> Self {
        Self {
            period1: PeriodSelector::new(2024, Month::Jun),
            period2: PeriodSelector::new(2022, Month::Jul),
            enabled: false,
            use_global_filters: true,
        }
    }
}

impl ComparisonSpec {
    /// An enabled comparison of two periods using the global filters.
    pub fn between(period1: PeriodSelector, period2: PeriodSelector) -> Self {
        Self {
            period1,
            period2,
            enabled: true,
            use_global_filters: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn use_global_filters(mut self, use_global: bool) -> Self {
        self.use_global_filters = use_global;
        self
    }
}

// ---------------------------------------------------------------------------
// ComparisonResult — Period-over-period totals and deltas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub period1_total: f64,
    pub period2_total: f64,
    pub period1_revenue: f64,
    pub period2_revenue: f64,
    pub period1_record_count: usize,
    pub period2_record_count: usize,
    pub difference: f64,
    /// `difference / period2_total * 100`, or exactly `0.0` when
    /// `period2_total` is not positive.
    pub growth_percentage: f64,
}

// ---------------------------------------------------------------------------
// PeriodAvailability — Which comparison periods matched no records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodAvailability {
    Both,
    MissingPeriod1,
    MissingPeriod2,
    MissingBoth,
}

impl PeriodAvailability {
    pub fn from_counts(period1_count: usize, period2_count: usize) -> Self {
        match (period1_count, period2_count) {
            (0, 0) => PeriodAvailability::MissingBoth,
            (0, _) => PeriodAvailability::MissingPeriod1,
            (_, 0) => PeriodAvailability::MissingPeriod2,
            _ => PeriodAvailability::Both,
        }
    }

    pub fn is_complete(self) -> bool {
        self == PeriodAvailability::Both
    }

    /// User-facing notice for the missing period(s), `None` when both have data.
    pub fn message(self, spec: &ComparisonSpec) -> Option<String> {
        match self {
            PeriodAvailability::Both => None,
            PeriodAvailability::MissingBoth => Some(
                "No data available for both comparison periods with the current filters."
                    .to_string(),
            ),
            PeriodAvailability::MissingPeriod1 => Some(format!(
                "No data available for {} with the current filters.",
                spec.period1.label()
            )),
            PeriodAvailability::MissingPeriod2 => Some(format!(
                "No data available for {} with the current filters.",
                spec.period2.label()
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// ComparisonOutcome — Result plus the records behind each period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOutcome {
    pub result: ComparisonResult,
    pub period1_records: Vec<SalesRecord>,
    pub period2_records: Vec<SalesRecord>,
    pub labels: [String; 2],
}

impl ComparisonOutcome {
    pub fn availability(&self) -> PeriodAvailability {
        PeriodAvailability::from_counts(
            self.result.period1_record_count,
            self.result.period2_record_count,
        )
    }

    pub fn total_records(&self) -> usize {
        self.result.period1_record_count + self.result.period2_record_count
    }
}
