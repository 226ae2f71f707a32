//! Linear-growth sales forecast.
//!
//! The growth rate is the mean fractional month-over-month change across the
//! trailing [`TRAILING_WINDOW`] records. Projections compound the last known
//! sales value by that rate once per step.

use crate::config::TRAILING_WINDOW;
use crate::models::{ForecastPoint, SalesRecord};

/// Mean fractional growth across the last (at most) three records.
///
/// Returns `0.0` for fewer than two records. A step whose previous value is
/// zero counts as zero growth.
pub fn trailing_growth_rate(series: &[SalesRecord]) -> f64 {
    let start = series.len().saturating_sub(TRAILING_WINDOW);
    let window = &series[start..];
    if window.len() < 2 {
        return 0.0;
    }

    let steps: f64 = window
        .windows(2)
        .map(|pair| step_rate(pair[0].sales, pair[1].sales))
        .sum();
    steps / (window.len() - 1) as f64
}

fn step_rate(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous
    }
}

/// Build a lazy forecast of `horizon` points from a chronological series.
///
/// An empty series yields an empty forecast. The returned iterator is
/// `Clone`, so it can be replayed without recomputing the growth rate.
pub fn forecast(series: &[SalesRecord], horizon: usize) -> Forecast {
    match series.last() {
        Some(last) => Forecast {
            base: last.sales,
            rate: trailing_growth_rate(series),
            step: 0,
            horizon,
        },
        None => Forecast {
            base: 0.0,
            rate: 0.0,
            step: 0,
            horizon: 0,
        },
    }
}

/// Iterator over projected [`ForecastPoint`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    base: f64,
    rate: f64,
    step: usize,
    horizon: usize,
}

impl Forecast {
    /// Growth rate the projection compounds.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Last observed sales value the projection starts from.
    pub fn base(&self) -> f64 {
        self.base
    }
}

impl Iterator for Forecast {
    type Item = ForecastPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.horizon {
            return None;
        }
        self.step += 1;
        let projected = self.base * (1.0 + self.rate).powi(self.step as i32);
        Some(ForecastPoint {
            label: format!("Forecast {}", self.step),
            projected_sales: projected.round(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.horizon - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Forecast {}
