//! Chart shaping for single-series and comparison views.

use crate::config::PIE_COMPARISON_NOTICE;
use crate::models::{ChartData, ChartKind, ComparisonOutcome, PieSlice, SalesRecord, SeriesPoint};

/// Shape the filtered records (or a comparison, when present) for `kind`.
///
/// Comparison views render as two labelled points. Pie charts cannot show a
/// comparison, so that combination falls back to a bar series with a notice.
pub fn shape(
    kind: ChartKind,
    filtered: &[SalesRecord],
    comparison: Option<&ComparisonOutcome>,
) -> ChartData {
    match (comparison, kind) {
        (Some(outcome), ChartKind::Pie) => ChartData::Series {
            kind: ChartKind::Bar,
            points: comparison_points(outcome),
            notice: Some(PIE_COMPARISON_NOTICE.to_string()),
        },
        (Some(outcome), kind) => ChartData::Series {
            kind,
            points: comparison_points(outcome),
            notice: None,
        },
        (None, ChartKind::Pie) => ChartData::Pie {
            slices: filtered
                .iter()
                .map(|r| PieSlice {
                    name: r.month.label().to_string(),
                    value: r.sales,
                })
                .collect(),
        },
        (None, kind) => ChartData::Series {
            kind,
            points: filtered
                .iter()
                .map(|r| SeriesPoint {
                    label: r.month.label().to_string(),
                    sales: r.sales,
                    revenue: r.revenue,
                    records: None,
                })
                .collect(),
            notice: None,
        },
    }
}

fn comparison_points(outcome: &ComparisonOutcome) -> Vec<SeriesPoint> {
    let r = &outcome.result;
    vec![
        SeriesPoint {
            label: outcome.labels[0].clone(),
            sales: r.period1_total,
            revenue: r.period1_revenue,
            records: Some(r.period1_record_count),
        },
        SeriesPoint {
            label: outcome.labels[1].clone(),
            sales: r.period2_total,
            revenue: r.period2_revenue,
            records: Some(r.period2_record_count),
        },
    ]
}
