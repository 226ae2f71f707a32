//! Summation and grouped rollups.

use std::collections::HashMap;

use crate::models::{AggregateResult, RollupKey, RollupRow, SalesRecord};

/// Sum sales and revenue over `records` and count them.
///
/// An empty input yields all zeros.
pub fn aggregate<'r, I>(records: I) -> AggregateResult
where
    I: IntoIterator<Item = &'r SalesRecord>,
{
    records
        .into_iter()
        .fold(AggregateResult::default(), |mut acc, r| {
            acc.total_sales += r.sales;
            acc.total_revenue += r.revenue;
            acc.record_count += 1;
            acc
        })
}

/// Group `records` by region or product and sum each group.
///
/// Groups appear in order of first appearance of their key.
pub fn rollup(records: &[SalesRecord], key: RollupKey) -> Vec<RollupRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<RollupRow> = Vec::new();

    for record in records {
        let k = key.select(record);
        let slot = *index.entry(k).or_insert_with(|| {
            rows.push(RollupRow {
                key: k.to_string(),
                sales: 0.0,
                revenue: 0.0,
                records: 0,
            });
            rows.len() - 1
        });
        rows[slot].sales += record.sales;
        rows[slot].revenue += record.revenue;
        rows[slot].records += 1;
    }

    rows
}

/// Sum a set of rollup rows back into a single aggregate.
///
/// Equal to [`aggregate`] over the records the rows were built from.
pub fn aggregate_rows(rows: &[RollupRow]) -> AggregateResult {
    rows.iter()
        .fold(AggregateResult::default(), |mut acc, row| {
            acc.total_sales += row.sales;
            acc.total_revenue += row.revenue;
            acc.record_count += row.records;
            acc
        })
}
