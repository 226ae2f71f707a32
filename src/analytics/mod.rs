//! Pure analytics over sales record sequences.
//!
//! Every function here is deterministic and side-effect free; recomputing
//! from the same inputs always yields the same output. [`RecordQuery`]
//! bundles the functions behind a borrowing wrapper over a record pool.

pub mod aggregate;
pub mod chart;
pub mod compare;
pub mod filter;
pub mod forecast;
pub mod overview;

pub use aggregate::{aggregate, aggregate_rows, rollup};
pub use chart::shape;
pub use compare::{compare, compare_totals};
pub use filter::{filter_records, records_for_year};
pub use forecast::{forecast, trailing_growth_rate, Forecast};
pub use overview::overview;

use crate::models::{
    AggregateResult, ComparisonOutcome, ComparisonSpec, FilterCriteria, Overview, RollupKey,
    RollupRow, SalesRecord,
};
use crate::record_filter::RecordFilter;

// ---------------------------------------------------------------------------
// RecordQuery
// ---------------------------------------------------------------------------

/// Query interface over a borrowed record pool.
pub struct RecordQuery<'a> {
    pool: &'a [SalesRecord],
}

impl<'a> RecordQuery<'a> {
    /// Create a new `RecordQuery` over the given pool.
    pub fn new(pool: &'a [SalesRecord]) -> Self {
        Self { pool }
    }

    /// The whole pool.
    pub fn all(&self) -> &'a [SalesRecord] {
        self.pool
    }

    /// Records of a single year.
    pub fn year(&self, year: i32) -> Vec<SalesRecord> {
        records_for_year(self.pool, year)
    }

    /// Records of `year` passing `criteria`.
    pub fn filtered(&self, year: i32, criteria: &FilterCriteria) -> Vec<SalesRecord> {
        RecordFilter::new().year(year).criteria(criteria).apply(self.pool)
    }

    /// Records passing an arbitrary [`RecordFilter`].
    pub fn matching(&self, filter: &RecordFilter) -> Vec<SalesRecord> {
        filter.apply(self.pool)
    }

    /// Totals for one year.
    pub fn totals(&self, year: i32) -> AggregateResult {
        aggregate(RecordFilter::new().year(year).apply_refs(self.pool))
    }

    /// Region rollup for one year.
    pub fn by_region(&self, year: i32) -> Vec<RollupRow> {
        rollup(&self.year(year), RollupKey::Region)
    }

    /// Product rollup for one year.
    pub fn by_product(&self, year: i32) -> Vec<RollupRow> {
        rollup(&self.year(year), RollupKey::Product)
    }

    /// Period comparison across the whole pool.
    pub fn compare(
        &self,
        spec: &ComparisonSpec,
        criteria: &FilterCriteria,
    ) -> Option<ComparisonOutcome> {
        compare(self.pool, spec, criteria)
    }

    /// Overview of `year` filtered by `criteria`.
    pub fn overview(
        &self,
        year: i32,
        criteria: &FilterCriteria,
        horizon: usize,
    ) -> Option<Overview> {
        overview(&self.filtered(year, criteria), horizon)
    }
}
