//! Two-period comparison.

use tracing::debug;

use crate::analytics::aggregate::aggregate;
use crate::models::{
    AggregateResult, ComparisonOutcome, ComparisonResult, ComparisonSpec, FilterCriteria,
    PeriodSelector, SalesRecord,
};
use crate::record_filter::RecordFilter;

/// Compare the two periods of `spec` over the full record pool.
///
/// Returns `None` when the comparison is disabled. Each period selects its
/// exact year and month, then filters region/product by either the ambient
/// `criteria` (when `use_global_filters` is set) or the period's own
/// selectors. The sales threshold does not apply to comparison periods.
///
/// A period with no matching records contributes zero totals; callers can
/// detect this through [`ComparisonOutcome::availability`].
pub fn compare(
    pool: &[SalesRecord],
    spec: &ComparisonSpec,
    criteria: &FilterCriteria,
) -> Option<ComparisonOutcome> {
    if !spec.enabled {
        return None;
    }

    let period1_records = select_period(pool, &spec.period1, spec.use_global_filters, criteria);
    let period2_records = select_period(pool, &spec.period2, spec.use_global_filters, criteria);

    let result = compare_totals(&aggregate(&period1_records), &aggregate(&period2_records));
    debug!(
        period1 = %spec.period1.label(),
        period2 = %spec.period2.label(),
        difference = result.difference,
        growth = result.growth_percentage,
        "computed period comparison"
    );

    Some(ComparisonOutcome {
        result,
        period1_records,
        period2_records,
        labels: [spec.period1.label(), spec.period2.label()],
    })
}

/// Derive the comparison deltas from two period aggregates.
///
/// `growth_percentage` is `0.0` whenever `period2.total_sales` is not
/// positive, regardless of period 1.
pub fn compare_totals(period1: &AggregateResult, period2: &AggregateResult) -> ComparisonResult {
    let difference = period1.total_sales - period2.total_sales;
    let growth_percentage = if period2.total_sales > 0.0 {
        difference / period2.total_sales * 100.0
    } else {
        0.0
    };

    ComparisonResult {
        period1_total: period1.total_sales,
        period2_total: period2.total_sales,
        period1_revenue: period1.total_revenue,
        period2_revenue: period2.total_revenue,
        period1_record_count: period1.record_count,
        period2_record_count: period2.record_count,
        difference,
        growth_percentage,
    }
}

fn select_period(
    pool: &[SalesRecord],
    period: &PeriodSelector,
    use_global_filters: bool,
    criteria: &FilterCriteria,
) -> Vec<SalesRecord> {
    let mut filter = RecordFilter::new();
    filter.year(period.year).month(period.month);

    if use_global_filters {
        filter
            .region(criteria.region.clone())
            .product(criteria.product.clone());
    } else {
        filter
            .region(period.region.clone())
            .product(period.product.clone());
    }

    filter.apply(pool)
}
