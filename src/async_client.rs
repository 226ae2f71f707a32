//! Async wrapper around the [`Dashboard`] for use in Tokio runtimes.
//!
//! Per-year fetches run concurrently on the blocking thread pool via
//! [`tokio::task::spawn_blocking`] and are awaited jointly before anything
//! is applied. The dashboard lock is only held to issue and complete load
//! tickets, never across a fetch, so a parameter change while a load is in
//! flight issues a newer ticket and the older completion is discarded.
//!
//! # Example
//!
//! ```no_run
//! use sales_analytics::{AsyncSalesAnalytics, DashboardParams};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncSalesAnalytics::builder().mock().build().await.unwrap();
//!     sdk.load().await.unwrap();
//!
//!     sdk.set_params(DashboardParams::for_year(2023)).await.unwrap();
//!     let views = sdk.views().unwrap().unwrap();
//!     println!("{} records", views.filtered.len());
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use crate::dashboard::{Dashboard, LoadOutcome, LoadState, LoadTicket};
use crate::error::{Result, SalesError};
use crate::export::{self, ExportFormat};
use crate::models::SalesRecord;
use crate::source::SalesSource;
use crate::views::{DashboardParams, DerivedViews};
use crate::SalesAnalyticsBuilder;

// ---------------------------------------------------------------------------
// AsyncSalesAnalyticsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncSalesAnalytics`] instance.
#[derive(Default)]
pub struct AsyncSalesAnalyticsBuilder {
    inner: SalesAnalyticsBuilder,
}

impl AsyncSalesAnalyticsBuilder {
    /// Use the bundled in-memory dataset. This is the default.
    pub fn mock(mut self) -> Self {
        self.inner = self.inner.mock();
        self
    }

    /// Use a JSON REST API at `base_url`.
    pub fn http(mut self, base_url: &str) -> Self {
        self.inner = self.inner.http(base_url);
        self
    }

    /// Use a caller-supplied source.
    pub fn source(mut self, source: Arc<dyn SalesSource>) -> Self {
        self.inner = self.inner.source(source);
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Override the mock source's simulated latencies.
    pub fn latency(mut self, fetch: Duration, rollup: Duration) -> Self {
        self.inner = self.inner.latency(fetch, rollup);
        self
    }

    /// Initial dashboard parameters.
    pub fn params(mut self, params: DashboardParams) -> Self {
        self.inner = self.inner.params(params);
        self
    }

    /// Build the async SDK. No data is fetched until [`AsyncSalesAnalytics::load`].
    ///
    /// Construction runs on the blocking thread pool: the HTTP source builds
    /// a blocking client, which must not happen on a runtime thread.
    pub async fn build(self) -> Result<AsyncSalesAnalytics> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = inner.build()?;
            Ok(AsyncSalesAnalytics {
                source: sdk.source,
                dashboard: Arc::new(Mutex::new(sdk.dashboard)),
            })
        })
        .await
        .map_err(|e| SalesError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncSalesAnalytics
// ---------------------------------------------------------------------------

/// Async wrapper around [`Dashboard`].
///
/// Cheap to clone; clones share the same dashboard and source.
#[derive(Clone)]
pub struct AsyncSalesAnalytics {
    source: Arc<dyn SalesSource>,
    dashboard: Arc<Mutex<Dashboard>>,
}

impl AsyncSalesAnalytics {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncSalesAnalyticsBuilder {
        AsyncSalesAnalyticsBuilder::default()
    }

    /// Wrap an existing source with the given initial parameters.
    pub fn new(source: Arc<dyn SalesSource>, params: DashboardParams) -> Self {
        Self {
            source,
            dashboard: Arc::new(Mutex::new(Dashboard::new(params))),
        }
    }

    /// Fetch every year the current parameters need.
    pub async fn load(&self) -> Result<LoadOutcome> {
        let ticket = self.lock()?.begin_load();
        self.run_ticket(ticket).await
    }

    /// Replace the parameters, fetching only when new years are needed.
    ///
    /// Returns `None` when the views were recomputed from the held pool.
    pub async fn set_params(&self, params: DashboardParams) -> Result<Option<LoadOutcome>> {
        let ticket = self.lock()?.set_params(params);
        match ticket {
            Some(ticket) => Ok(Some(self.run_ticket(ticket).await?)),
            None => Ok(None),
        }
    }

    pub fn params(&self) -> Result<DashboardParams> {
        Ok(self.lock()?.params().clone())
    }

    pub fn state(&self) -> Result<LoadState> {
        Ok(self.lock()?.state().clone())
    }

    /// Derived views for the current parameters; `None` unless loaded.
    pub fn views(&self) -> Result<Option<DerivedViews>> {
        Ok(self.lock()?.views())
    }

    /// Export the currently filtered records.
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        let filtered = self.views()?.map(|v| v.filtered).unwrap_or_default();
        export::export(format, &filtered)
    }

    /// Fetch `ticket.years` concurrently and complete the ticket.
    async fn run_ticket(&self, ticket: LoadTicket) -> Result<LoadOutcome> {
        let result = fetch_years_concurrently(self.source.clone(), &ticket.years).await;
        Ok(self.lock()?.complete_load(&ticket, result))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Dashboard>> {
        self.dashboard
            .lock()
            .map_err(|_| SalesError::InvalidArgument("dashboard lock poisoned".into()))
    }
}

/// Issue one blocking fetch per year at once and wait for all of them.
///
/// Records are concatenated in the order of `years`. Any failed fetch fails
/// the whole load, after every task has finished.
pub async fn fetch_years_concurrently(
    source: Arc<dyn SalesSource>,
    years: &[i32],
) -> Result<Vec<SalesRecord>> {
    let handles: Vec<_> = years
        .iter()
        .map(|&year| {
            let source = source.clone();
            tokio::task::spawn_blocking(move || source.fetch(year))
        })
        .collect();

    let mut pool = Vec::new();
    let mut first_error: Option<SalesError> = None;
    for (handle, year) in handles.into_iter().zip(years) {
        let outcome = handle
            .await
            .map_err(|e| SalesError::Fetch(format!("Task join error: {e}")))
            .and_then(|r| r);
        match outcome {
            Ok(records) => {
                debug!(year, count = records.len(), "fetched sales records");
                pool.extend(records);
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(pool),
    }
}
