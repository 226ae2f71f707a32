//! Threshold/region/product filtering of record sequences.

use crate::models::{FilterCriteria, SalesRecord};
use crate::record_filter::RecordFilter;

/// Keep the records satisfying `criteria`, preserving input order.
///
/// A record passes when `sales >= threshold` and its region and product are
/// matched by the corresponding selectors.
pub fn filter_records(records: &[SalesRecord], criteria: &FilterCriteria) -> Vec<SalesRecord> {
    RecordFilter::new().criteria(criteria).apply(records)
}

/// All records belonging to `year`, in input order.
pub fn records_for_year(records: &[SalesRecord], year: i32) -> Vec<SalesRecord> {
    RecordFilter::new().year(year).apply(records)
}
