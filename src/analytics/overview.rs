//! Headline metrics for a filtered series.

use crate::analytics::forecast::forecast;
use crate::models::{Overview, OverviewAverages, OverviewTotals, SalesRecord};

/// Totals, per-record averages, overall growth and a forecast for `series`.
///
/// Returns `None` for an empty series. Missing `profit`/`customers` values
/// count as zero.
pub fn overview(series: &[SalesRecord], horizon: usize) -> Option<Overview> {
    let (first, last) = (series.first()?, series.last()?);

    let totals = series.iter().fold(OverviewTotals::default(), |mut t, r| {
        t.sales += r.sales;
        t.revenue += r.revenue;
        t.profit += r.profit_or_zero();
        t.customers += r.customers_or_zero();
        t
    });

    let count = series.len() as f64;
    let averages = OverviewAverages {
        sales: totals.sales / count,
        revenue: totals.revenue / count,
    };

    let growth_rate = if series.len() > 1 && first.sales != 0.0 {
        (last.sales - first.sales) / first.sales * 100.0
    } else {
        0.0
    };

    Some(Overview {
        totals,
        averages,
        growth_rate,
        forecast: forecast(series, horizon).collect(),
    })
}
