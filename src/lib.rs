//! Sales analytics SDK for Rust.
//!
//! Fetches monthly sales records from a data source (a built-in mock or a
//! JSON REST API), then filters, rolls up, compares and forecasts them for a
//! dashboard. All analytics are pure functions of the record pool and an
//! immutable [`DashboardParams`] value.
//!
//! # Quick start
//!
//! ```no_run
//! use sales_analytics::{DashboardParams, FilterCriteria, SalesAnalytics};
//!
//! let mut sdk = SalesAnalytics::builder().mock().build().unwrap();
//! sdk.load();
//!
//! // Narrow the 2024 view to the North region
//! let params = DashboardParams::for_year(2024)
//!     .with_filters(FilterCriteria::default().with_region("North"));
//! sdk.set_params(params);
//!
//! let views = sdk.views().unwrap();
//! println!("{} records, {} sales", views.summary.record_count, views.summary.total_sales);
//! ```

pub mod analytics;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod models;
pub mod record_filter;
pub mod source;
pub mod views;

#[cfg(feature = "async")]
pub use async_client::AsyncSalesAnalytics;
pub use analytics::RecordQuery;
pub use dashboard::{Dashboard, LoadOutcome, LoadState, LoadTicket};
pub use error::{Result, SalesError};
pub use export::ExportFormat;
pub use models::*;
pub use record_filter::RecordFilter;
pub use source::{HttpSource, MockSource, SalesSource};
pub use views::{DashboardParams, DerivedViews};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// SalesAnalyticsBuilder
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum SourceChoice {
    Mock,
    Http(String),
    Custom(Arc<dyn SalesSource>),
}

/// Builder for configuring and constructing a [`SalesAnalytics`] instance.
///
/// Use [`SalesAnalytics::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SalesAnalyticsBuilder::build).
#[derive(Clone)]
pub struct SalesAnalyticsBuilder {
    source: SourceChoice,
    timeout: Duration,
    latency: Option<(Duration, Duration)>,
    params: DashboardParams,
}

impl Default for SalesAnalyticsBuilder {
    fn default() -> Self {
        Self {
            source: SourceChoice::Mock,
            timeout: config::DEFAULT_TIMEOUT,
            latency: None,
            params: DashboardParams::default(),
        }
    }
}

impl SalesAnalyticsBuilder {
    /// Use the bundled in-memory dataset. This is the default.
    pub fn mock(mut self) -> Self {
        self.source = SourceChoice::Mock;
        self
    }

    /// Use a JSON REST API at `base_url`.
    pub fn http(mut self, base_url: &str) -> Self {
        self.source = SourceChoice::Http(base_url.to_string());
        self
    }

    /// Use a caller-supplied source.
    pub fn source(mut self, source: Arc<dyn SalesSource>) -> Self {
        self.source = SourceChoice::Custom(source);
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the mock source's simulated latencies.
    ///
    /// Ignored for HTTP and custom sources.
    pub fn latency(mut self, fetch: Duration, rollup: Duration) -> Self {
        self.latency = Some((fetch, rollup));
        self
    }

    /// Initial dashboard parameters.
    pub fn params(mut self, params: DashboardParams) -> Self {
        self.params = params;
        self
    }

    /// Build the SDK. No data is fetched until [`SalesAnalytics::load`].
    pub fn build(self) -> Result<SalesAnalytics> {
        let source: Arc<dyn SalesSource> = match self.source {
            SourceChoice::Mock => {
                let mut mock = MockSource::new();
                if let Some((fetch, rollup)) = self.latency {
                    mock = mock.with_latency(fetch, rollup);
                }
                Arc::new(mock)
            }
            SourceChoice::Http(base) => Arc::new(HttpSource::new(&base, self.timeout)?),
            SourceChoice::Custom(source) => source,
        };
        Ok(SalesAnalytics {
            source,
            dashboard: Dashboard::new(self.params),
        })
    }
}

// ---------------------------------------------------------------------------
// SalesAnalytics
// ---------------------------------------------------------------------------

/// The main entry point of the SDK.
///
/// Owns a [`SalesSource`] and a [`Dashboard`], loading synchronously from
/// the source whenever the parameters need years that are not held yet.
pub struct SalesAnalytics {
    source: Arc<dyn SalesSource>,
    dashboard: Dashboard,
}

impl SalesAnalytics {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> SalesAnalyticsBuilder {
        SalesAnalyticsBuilder::default()
    }

    /// Fetch every year the current parameters need.
    pub fn load(&mut self) -> LoadOutcome {
        self.dashboard.load(self.source.as_ref())
    }

    /// Replace the parameters, fetching only when new years are needed.
    ///
    /// Returns the load outcome when a fetch happened, `None` when the views
    /// were simply recomputed from the held pool.
    pub fn set_params(&mut self, params: DashboardParams) -> Option<LoadOutcome> {
        self.dashboard.update(self.source.as_ref(), params)
    }

    pub fn params(&self) -> &DashboardParams {
        self.dashboard.params()
    }

    pub fn state(&self) -> &LoadState {
        self.dashboard.state()
    }

    /// The static failure message, when the last load failed.
    pub fn error_message(&self) -> Option<&str> {
        self.dashboard.error_message()
    }

    /// Derived views for the current parameters; `None` unless loaded.
    pub fn views(&self) -> Option<DerivedViews> {
        self.dashboard.views()
    }

    /// Query interface over the loaded record pool.
    pub fn query(&self) -> RecordQuery<'_> {
        RecordQuery::new(self.dashboard.pool())
    }

    /// Export the currently filtered records.
    ///
    /// Returns an empty export when nothing is loaded.
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        let filtered = self.views().map(|v| v.filtered).unwrap_or_default();
        export::export(format, &filtered)
    }

    /// Export the currently filtered records to `<dir>/<stem>.<ext>`.
    pub fn export_to(&self, dir: &Path, stem: &str, format: ExportFormat) -> Result<PathBuf> {
        let filtered = self.views().map(|v| v.filtered).unwrap_or_default();
        export::write_export(dir, stem, format, &filtered)
    }

    /// The data source in use.
    pub fn source(&self) -> &dyn SalesSource {
        self.source.as_ref()
    }

    /// Return a reference to the underlying [`Dashboard`].
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Return a mutable reference to the underlying [`Dashboard`].
    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SalesAnalytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let years: Vec<String> = self
            .dashboard
            .loaded_years()
            .iter()
            .map(|y| y.to_string())
            .collect();
        write!(
            f,
            "SalesAnalytics(year={}, loaded=[{}], records={}, state={:?})",
            self.dashboard.params().year,
            years.join(", "),
            self.dashboard.pool().len(),
            self.dashboard.state()
        )
    }
}
