//! Sales source backed by a JSON REST API.
//!
//! Talks to a json-server style backend exposing `/sales`, `/products` and
//! `/regions`. Region and product filters are pushed down as query
//! parameters; wildcard selectors are simply not sent.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config;
use crate::error::{Result, SalesError};
use crate::models::{Product, Region, SalesRecord, SalesRecordPatch, Selector};
use crate::record_filter::RecordFilter;

use super::SalesSource;

/// Blocking HTTP client for the sales API.
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    /// Create a source for `base_url` (e.g. `http://localhost:3001`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Source for the default local API with the default timeout.
    pub fn local() -> Result<Self> {
        Self::new(config::API_BASE, config::DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch sales records, optionally narrowed by year, region and product.
    pub fn sales(
        &self,
        year: Option<i32>,
        region: &Selector,
        product: &Selector,
    ) -> Result<Vec<SalesRecord>> {
        let mut filter = RecordFilter::new();
        if let Some(y) = year {
            filter.year(y);
        }
        filter.region(region.clone()).product(product.clone());
        self.get_json("sales", &filter.query_pairs())
    }

    /// List the product catalogue.
    pub fn products(&self) -> Result<Vec<Product>> {
        self.get_json("products", &[])
    }

    /// List the sales regions.
    pub fn regions(&self) -> Result<Vec<Region>> {
        self.get_json("regions", &[])
    }

    /// Create a new record; the server assigns its `id`.
    pub fn add_record(&self, record: &SalesRecord) -> Result<SalesRecord> {
        let mut body = record.clone();
        body.id = None;
        let url = self.url("sales");
        debug!(%url, "POST sales record");
        let resp = self.client.post(&url).json(&body).send()?.error_for_status()?;
        Ok(resp.json()?)
    }

    /// Apply a partial update to the record with `id`.
    ///
    /// Returns [`SalesError::NotFound`] when the server has no such record.
    pub fn update_record(&self, id: u64, patch: &SalesRecordPatch) -> Result<SalesRecord> {
        let url = self.url(&format!("sales/{}", id));
        debug!(%url, "PATCH sales record");
        let resp = self.client.patch(&url).json(patch).send()?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SalesError::NotFound(format!("sales record {}", id)));
        }
        Ok(resp.error_for_status()?.json()?)
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| {
                warn!(%url, error = %e, "sales API request failed");
                e
            })?
            .error_for_status()?;
        Ok(resp.json()?)
    }
}

impl SalesSource for HttpSource {
    fn fetch(&self, year: i32) -> Result<Vec<SalesRecord>> {
        self.sales(Some(year), &Selector::Any, &Selector::Any)
    }
}
