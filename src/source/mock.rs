//! In-memory sales source with simulated network latency.

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::analytics::aggregate::rollup;
use crate::config;
use crate::error::{Result, SalesError};
use crate::models::{Month, RollupKey, RollupRow, SalesRecord};

use super::SalesSource;

/// Monthly sales per year, January through December.
static SALES_BY_YEAR: [(i32, [f64; 12]); 3] = [
    (
        2022,
        [
            12000.0, 19000.0, 13000.0, 17000.0, 15000.0, 18000.0, 21000.0, 16000.0, 14000.0,
            19000.0, 22000.0, 25000.0,
        ],
    ),
    (
        2023,
        [
            14000.0, 16000.0, 18000.0, 21000.0, 19000.0, 22000.0, 24000.0, 20000.0, 23000.0,
            26000.0, 28000.0, 30000.0,
        ],
    ),
    (
        2024,
        [
            17000.0, 19000.0, 21000.0, 24000.0, 22000.0, 25000.0, 27000.0, 23000.0, 26000.0,
            29000.0, 31000.0, 33000.0,
        ],
    ),
];

/// Revenue is booked at a flat unit price in the bundled data.
const UNIT_PRICE: f64 = 4.0;

/// The bundled 36-record dataset (2022-2024).
///
/// Regions rotate North/South/East/West and products rotate
/// Electronics/Furniture/Clothing month by month.
pub fn sample_records() -> Vec<SalesRecord> {
    SALES_BY_YEAR
        .iter()
        .flat_map(|&(year, sales)| {
            Month::ALL.into_iter().zip(sales).enumerate().map(move |(i, (month, s))| {
                SalesRecord::new(
                    year,
                    month,
                    s,
                    s * UNIT_PRICE,
                    config::REGIONS[i % config::REGIONS.len()],
                    config::PRODUCTS[i % config::PRODUCTS.len()],
                )
            })
        })
        .collect()
}

/// A [`SalesSource`] serving a fixed record pool after an artificial delay.
#[derive(Debug, Clone)]
pub struct MockSource {
    records: Vec<SalesRecord>,
    latency: Duration,
    rollup_latency: Duration,
    fail: bool,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            records: sample_records(),
            latency: config::DEFAULT_FETCH_LATENCY,
            rollup_latency: config::DEFAULT_ROLLUP_LATENCY,
            fail: false,
        }
    }
}

impl MockSource {
    /// Source over the bundled dataset with the default latencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source over the bundled dataset that answers immediately.
    pub fn instant() -> Self {
        Self::default().with_latency(Duration::ZERO, Duration::ZERO)
    }

    /// Source whose every fetch fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::instant()
        }
    }

    /// Replace the served records.
    pub fn with_records(mut self, records: Vec<SalesRecord>) -> Self {
        self.records = records;
        self
    }

    /// Set the single-year fetch latency and the extra grouped-fetch latency.
    pub fn with_latency(mut self, latency: Duration, rollup_latency: Duration) -> Self {
        self.latency = latency;
        self.rollup_latency = rollup_latency;
        self
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    fn pause(duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

impl SalesSource for MockSource {
    fn fetch(&self, year: i32) -> Result<Vec<SalesRecord>> {
        Self::pause(self.latency);
        if self.fail {
            return Err(SalesError::Fetch(format!(
                "mock source refused to serve {}",
                year
            )));
        }
        let records: Vec<SalesRecord> = self
            .records
            .iter()
            .filter(|r| r.year == year)
            .cloned()
            .collect();
        debug!(year, count = records.len(), "mock source served records");
        Ok(records)
    }

    fn fetch_by_region(&self, year: i32) -> Result<Vec<RollupRow>> {
        Self::pause(self.rollup_latency);
        Ok(rollup(&self.fetch(year)?, RollupKey::Region))
    }

    fn fetch_by_product(&self, year: i32) -> Result<Vec<RollupRow>> {
        Self::pause(self.rollup_latency);
        Ok(rollup(&self.fetch(year)?, RollupKey::Product))
    }
}
