// src/automation.rs
// The long-running cycle scheduler: fetch -> aggregate -> rank -> merge ->
// notify -> persist, repeated on a fixed interval until cancelled.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use metrics::counter;
use tokio_util::sync::CancellationToken;

use crate::merge::merge_with_persisted;
use crate::model::UserSearchRequest;
use crate::notify::{render_report, ChannelMux};
use crate::rank::order_trips;
use crate::scrape::ScrapeSource;
use crate::search;
use crate::search::types::FlightSource;
use crate::store::TripStore;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(24 * 3600);

/// Outcome of one completed cycle, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub top_len: usize,
    pub changed: bool,
    pub notified: bool,
}

pub struct Automation {
    sources: Vec<Arc<dyn FlightSource>>,
    scraper: Arc<dyn ScrapeSource>,
    store: Arc<dyn TripStore>,
    channels: ChannelMux,
    interval: Duration,
}

impl Automation {
    pub fn new(
        sources: Vec<Arc<dyn FlightSource>>,
        scraper: Arc<dyn ScrapeSource>,
        store: Arc<dyn TripStore>,
        channels: ChannelMux,
    ) -> Self {
        Self {
            sources,
            scraper,
            store,
            channels,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run cycles until cancelled. The first cycle starts immediately; the
    /// sleep between cycles is interruptible. A failed cycle (source or
    /// persistence error) is surfaced loudly and the loop continues with
    /// the next scheduled cycle.
    pub async fn run(&self, request: &UserSearchRequest, cancel: CancellationToken) {
        loop {
            if cancel.is_cancelled() {
                break;
            }

            match self.run_cycle(request, &cancel).await {
                Ok(outcome) => {
                    counter!("cycle_runs_total").increment(1);
                    tracing::info!(
                        top = outcome.top_len,
                        changed = outcome.changed,
                        notified = outcome.notified,
                        "cycle finished"
                    );
                }
                Err(e) => {
                    tracing::error!(error = ?e, "cycle failed");
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        tracing::info!("automation stopped");
    }

    /// One fetch -> aggregate -> rank -> merge -> notify -> persist pass.
    /// A hard failure of any source aborts the cycle before anything is
    /// notified or persisted; a cycle cancelled mid-flight likewise produces
    /// no persistence write.
    pub async fn run_cycle(
        &self,
        request: &UserSearchRequest,
        cancel: &CancellationToken,
    ) -> Result<CycleOutcome> {
        let collected =
            search::aggregate(&self.sources, self.scraper.as_ref(), request, cancel)
                .await
                .context("aggregating sources")?;
        if cancel.is_cancelled() {
            return Ok(CycleOutcome {
                top_len: 0,
                changed: false,
                notified: false,
            });
        }

        let ranked = order_trips(collected, request.priority);
        let persisted = self.store.load().await.context("loading persisted trips")?;
        let outcome = merge_with_persisted(
            persisted,
            ranked,
            request.priority,
            request.max_top_results,
        );

        let mut notified = false;
        if outcome.changed && !outcome.top.is_empty() {
            let message = render_report(request, &outcome.top);
            let failures = self.channels.notify_all(&message).await;
            if failures > 0 {
                tracing::warn!(failures, "some notification channels failed");
            }
            notified = true;
        }

        // Persist whether or not anything changed, so the next cycle always
        // compares against the freshest replacement.
        self.store
            .save(&outcome.top)
            .await
            .context("persisting top trips")?;

        Ok(CycleOutcome {
            top_len: outcome.top.len(),
            changed: outcome.changed,
            notified,
        })
    }
}
