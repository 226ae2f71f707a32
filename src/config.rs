use std::time::Duration;

pub const API_BASE: &str = "http://localhost:3001";

pub const DEFAULT_YEAR: i32 = 2024;

pub const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

pub const PRODUCTS: [&str; 3] = ["Electronics", "Furniture", "Clothing"];

/// Simulated latency of a single-year fetch from the mock source.
pub const DEFAULT_FETCH_LATENCY: Duration = Duration::from_millis(500);

/// Extra latency the mock source adds in front of the grouped fetches.
pub const DEFAULT_ROLLUP_LATENCY: Duration = Duration::from_millis(300);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_FORECAST_HORIZON: usize = 3;

/// Number of trailing records the forecaster derives its growth rate from.
pub const TRAILING_WINDOW: usize = 3;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data. Please try again.";

pub const PIE_COMPARISON_NOTICE: &str =
    "Pie charts are not available for comparison mode. Please use Bar or Line charts.";

/// Label the UI uses for the match-everything selector value.
pub const WILDCARD_LABEL: &str = "All";
