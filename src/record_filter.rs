//! Chainable record filter.
//!
//! Predicates are combined conjunctively; an unset predicate matches every
//! record. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use sales_analytics::{Month, RecordFilter, SalesRecord};
//!
//! let records = vec![
//!     SalesRecord::new(2024, Month::Jun, 25000.0, 100000.0, "South", "Clothing"),
//!     SalesRecord::new(2024, Month::Jul, 27000.0, 108000.0, "East", "Electronics"),
//! ];
//!
//! let june = RecordFilter::new()
//!     .year(2024)
//!     .month(Month::Jun)
//!     .region("South")
//!     .apply(&records);
//! assert_eq!(june.len(), 1);
//! ```

use crate::models::{FilterCriteria, Month, SalesRecord, Selector};

/// Accumulates record predicates and evaluates them against slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    year: Option<i32>,
    month: Option<Month>,
    min_sales: Option<f64>,
    region: Selector,
    product: Selector,
}

impl RecordFilter {
    /// Create a filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single year.
    pub fn year(&mut self, year: i32) -> &mut Self {
        self.year = Some(year);
        self
    }

    /// Restrict to a single month.
    pub fn month(&mut self, month: Month) -> &mut Self {
        self.month = Some(month);
        self
    }

    /// Require `sales >= threshold`.
    pub fn min_sales(&mut self, threshold: f64) -> &mut Self {
        self.min_sales = Some(threshold);
        self
    }

    /// Restrict by region. Accepts a [`Selector`] or a plain label.
    pub fn region(&mut self, region: impl Into<Selector>) -> &mut Self {
        self.region = region.into();
        self
    }

    /// Restrict by product. Accepts a [`Selector`] or a plain label.
    pub fn product(&mut self, product: impl Into<Selector>) -> &mut Self {
        self.product = product.into();
        self
    }

    /// Apply all three predicates of a [`FilterCriteria`].
    pub fn criteria(&mut self, criteria: &FilterCriteria) -> &mut Self {
        self.min_sales = Some(criteria.threshold);
        self.region = criteria.region.clone();
        self.product = criteria.product.clone();
        self
    }

    /// Whether a single record satisfies every predicate.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.year.map_or(true, |y| record.year == y)
            && self.month.map_or(true, |m| record.month == m)
            && self.min_sales.map_or(true, |t| record.sales >= t)
            && self.region.matches(&record.region)
            && self.product.matches(&record.product)
    }

    /// Return owned copies of the matching records, in input order.
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    /// Return references to the matching records, in input order.
    pub fn apply_refs<'r>(&self, records: &'r [SalesRecord]) -> Vec<&'r SalesRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Count matching records.
    pub fn count(&self, records: &[SalesRecord]) -> usize {
        records.iter().filter(|r| self.matches(r)).count()
    }

    /// Query-string pairs for a remote source.
    ///
    /// Wildcard selectors and unset predicates are omitted, so an empty
    /// filter produces no pairs. `min_sales` has no server-side equivalent
    /// and is never sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(y) = self.year {
            pairs.push(("year", y.to_string()));
        }
        if let Some(m) = self.month {
            pairs.push(("month", m.label().to_string()));
        }
        if let Some(r) = self.region.as_exact() {
            pairs.push(("region", r.to_string()));
        }
        if let Some(p) = self.product.as_exact() {
            pairs.push(("product", p.to_string()));
        }
        pairs
    }
}
