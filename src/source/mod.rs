//! Sales data sources.
//!
//! A [`SalesSource`] supplies the raw monthly records for a year. The engine
//! treats it as a black box: fetches may be slow and may fail, and an
//! unknown year yields an empty sequence rather than an error.

pub mod http;
pub mod mock;

pub use http::HttpSource;
pub use mock::MockSource;

use std::thread;

use tracing::debug;

use crate::analytics::aggregate::rollup;
use crate::error::{Result, SalesError};
use crate::models::{RollupKey, RollupRow, SalesRecord};

/// Supplier of monthly sales records.
pub trait SalesSource: Send + Sync {
    /// Fetch every record for `year`, in chronological order.
    fn fetch(&self, year: i32) -> Result<Vec<SalesRecord>>;

    /// Per-region sums for `year`.
    fn fetch_by_region(&self, year: i32) -> Result<Vec<RollupRow>> {
        Ok(rollup(&self.fetch(year)?, RollupKey::Region))
    }

    /// Per-product sums for `year`.
    fn fetch_by_product(&self, year: i32) -> Result<Vec<RollupRow>> {
        Ok(rollup(&self.fetch(year)?, RollupKey::Product))
    }
}

/// Fetch several years concurrently and concatenate them in the order given.
///
/// One scoped thread is spawned per year and all of them are joined before
/// anything is returned. The load is all-or-nothing: any failing year fails
/// the whole call, so callers never compute views from a partial pool.
pub fn fetch_years(source: &dyn SalesSource, years: &[i32]) -> Result<Vec<SalesRecord>> {
    let results: Vec<Result<Vec<SalesRecord>>> = thread::scope(|scope| {
        let handles: Vec<_> = years
            .iter()
            .map(|&year| scope.spawn(move || source.fetch(year)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(SalesError::Fetch("fetch thread panicked".into())))
            })
            .collect()
    });

    let mut pool = Vec::new();
    for (&year, result) in years.iter().zip(results) {
        let records = result?;
        debug!(year, count = records.len(), "fetched sales records");
        pool.extend(records);
    }
    Ok(pool)
}
