//! Load orchestration for the analytics views.
//!
//! The [`Dashboard`] holds the current parameters, the raw record pool and a
//! [`LoadState`]. Loads are split into a ticket ([`Dashboard::begin_load`])
//! and a completion ([`Dashboard::complete_load`]) so the fetch itself can
//! run anywhere, including on another thread. Every ticket carries a
//! sequence number; a completion whose ticket is no longer the latest is
//! discarded, so an older fetch resolving late never overwrites newer data.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LOAD_FAILED_MESSAGE;
use crate::error::Result;
use crate::models::SalesRecord;
use crate::source::{fetch_years, SalesSource};
use crate::views::{self, DashboardParams, DerivedViews};

// ---------------------------------------------------------------------------
// LoadState / LoadTicket / LoadOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading { seq: u64 },
    Ready,
    Failed { message: String },
}

/// A pending load: its sequence number and the years to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub years: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The completion was the latest request and has been applied.
    Applied,
    /// A newer request was issued meanwhile; the completion was dropped.
    Stale,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub struct Dashboard {
    params: DashboardParams,
    pool: Vec<SalesRecord>,
    loaded_years: BTreeSet<i32>,
    state: LoadState,
    /// Years of the most recently issued ticket.
    requested: Vec<i32>,
    latest_seq: u64,
}

impl Dashboard {
    pub fn new(params: DashboardParams) -> Self {
        Self {
            params,
            pool: Vec::new(),
            loaded_years: BTreeSet::new(),
            state: LoadState::Idle,
            requested: Vec::new(),
            latest_seq: 0,
        }
    }

    pub fn params(&self) -> &DashboardParams {
        &self.params
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The raw records currently held.
    pub fn pool(&self) -> &[SalesRecord] {
        &self.pool
    }

    pub fn loaded_years(&self) -> Vec<i32> {
        self.loaded_years.iter().copied().collect()
    }

    /// The static error message while in the failed state.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Whether the held pool covers every year `params` needs.
    pub fn covers(&self, params: &DashboardParams) -> bool {
        params
            .required_years()
            .iter()
            .all(|y| self.loaded_years.contains(y))
    }

    /// Whether replacing the parameters with `params` needs a new fetch.
    ///
    /// A load in flight, or one that failed, counts as covering the years
    /// it was issued for.
    pub fn needs_fetch(&self, params: &DashboardParams) -> bool {
        match &self.state {
            LoadState::Idle => true,
            LoadState::Loading { .. } | LoadState::Failed { .. } => !params
                .required_years()
                .iter()
                .all(|y| self.requested.contains(y)),
            LoadState::Ready => !self.covers(params),
        }
    }

    /// Replace the parameters.
    ///
    /// Returns a ticket when the new parameters need years that are neither
    /// held nor being fetched. Threshold, region, product and chart changes
    /// never refetch; the views recompute from the held pool on the next
    /// [`views`](Self::views) call. A failed dashboard stays failed until a
    /// change needs a fetch or [`begin_load`](Self::begin_load) is called.
    pub fn set_params(&mut self, params: DashboardParams) -> Option<LoadTicket> {
        let refetch = self.needs_fetch(&params);
        self.params = params;
        if refetch {
            Some(self.begin_load())
        } else {
            debug!("parameters changed; recomputing from held pool");
            None
        }
    }

    /// Issue a new load for the current parameters and enter `Loading`.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_seq += 1;
        let ticket = LoadTicket {
            seq: self.latest_seq,
            years: self.params.required_years(),
        };
        self.state = LoadState::Loading { seq: ticket.seq };
        self.requested = ticket.years.clone();
        debug!(seq = ticket.seq, years = ?ticket.years, "load started");
        ticket
    }

    /// Apply the result of a load, unless a newer load has been issued.
    ///
    /// On success the pool is replaced and the state becomes `Ready`. On
    /// failure the state becomes `Failed` with a static user-facing message;
    /// there is no automatic retry.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<SalesRecord>>,
    ) -> LoadOutcome {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale load completion"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(records) => {
                info!(
                    seq = ticket.seq,
                    years = ?ticket.years,
                    count = records.len(),
                    "load complete"
                );
                self.pool = records;
                self.loaded_years = ticket.years.iter().copied().collect();
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "load failed");
                self.state = LoadState::Failed {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
            }
        }
        LoadOutcome::Applied
    }

    /// Fetch the required years from `source` and apply them.
    pub fn load(&mut self, source: &dyn SalesSource) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = fetch_years(source, &ticket.years);
        self.complete_load(&ticket, result)
    }

    /// Change parameters and, if they need a fetch, load synchronously.
    pub fn update(
        &mut self,
        source: &dyn SalesSource,
        params: DashboardParams,
    ) -> Option<LoadOutcome> {
        self.set_params(params).map(|ticket| {
            let result = fetch_years(source, &ticket.years);
            self.complete_load(&ticket, result)
        })
    }

    /// Derived views for the current parameters, only when `Ready`.
    pub fn views(&self) -> Option<DerivedViews> {
        match self.state {
            LoadState::Ready => Some(views::compute(&self.pool, &self.params)),
            _ => None,
        }
    }
}
