//! Shared test fixtures for the sales analytics integration tests.
//!
//! Provides the bundled 36-record pool, a small hand-built pool with known
//! totals, and SDK constructors that never sleep.

#![allow(dead_code)]

use sales_analytics::source::mock::sample_records;
use sales_analytics::{DashboardParams, MockSource, Month, SalesAnalytics, SalesRecord};
use std::sync::Arc;

/// The bundled 2022-2024 dataset.
pub fn sample_pool() -> Vec<SalesRecord> {
    sample_records()
}

/// Shorthand record constructor.
pub fn record(
    year: i32,
    month: Month,
    sales: f64,
    region: &str,
    product: &str,
) -> SalesRecord {
    SalesRecord::new(year, month, sales, sales * 4.0, region, product)
}

/// A small pool spanning two years, with a repeated region.
///
/// 2024: Jan North/Electronics 10000, Feb South/Furniture 20000,
///       Mar North/Clothing 30000
/// 2023: Jan North/Electronics 5000
pub fn small_pool() -> Vec<SalesRecord> {
    vec![
        record(2024, Month::Jan, 10000.0, "North", "Electronics"),
        record(2024, Month::Feb, 20000.0, "South", "Furniture"),
        record(2024, Month::Mar, 30000.0, "North", "Clothing"),
        record(2023, Month::Jan, 5000.0, "North", "Electronics"),
    ]
}

/// Records with the given sales values, one per consecutive month of 2024.
pub fn series(values: &[f64]) -> Vec<SalesRecord> {
    values
        .iter()
        .zip(Month::ALL)
        .map(|(&v, m)| record(2024, m, v, "North", "Electronics"))
        .collect()
}

/// SDK over the bundled dataset with zero latency.
pub fn instant_sdk(params: DashboardParams) -> SalesAnalytics {
    SalesAnalytics::builder()
        .source(Arc::new(MockSource::instant()))
        .params(params)
        .build()
        .unwrap()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}
