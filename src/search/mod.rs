// src/search/mod.rs
pub mod providers;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::equality::dedup_trips;
use crate::model::{Trip, UserSearchRequest};
use crate::scrape::ScrapeSource;
use crate::search::types::FlightSource;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("search_trips_total", "Trips collected from sources.");
        describe_counter!("search_filtered_total", "Trips dropped by the stops filter.");
        describe_counter!("search_dedup_total", "Trips removed as structural duplicates.");
        describe_counter!("source_errors_total", "Source fetch/parse errors.");
        describe_counter!("cycle_runs_total", "Completed automation cycles.");
        describe_counter!("notify_failures_total", "Notification channel failures.");
        describe_gauge!("cycle_last_run_ts", "Unix ts when a cycle last ran.");
    });
}

/// Apply the stops filter, then structural dedup (first seen wins).
/// Returns (kept, filtered_count, dedup_count).
pub fn filter_and_dedup(
    trips: Vec<Trip>,
    max_stops: usize,
) -> (Vec<Trip>, usize, usize) {
    let before = trips.len();
    let filtered: Vec<Trip> = trips
        .into_iter()
        .filter(|t| t.stops() <= max_stops)
        .collect();
    let filtered_out = before - filtered.len();

    let after_filter = filtered.len();
    let kept = dedup_trips(filtered);
    let dedup_out = after_filter - kept.len();

    (kept, filtered_out, dedup_out)
}

/// Run one aggregation pass: fan out to all sources concurrently, wait for
/// all of them, append scraping findings, then filter and dedup.
///
/// Results are collected in a fixed enumeration order (configured source
/// order, then findings), which makes the first-seen-wins dedup rule
/// deterministic for deterministic source outputs. Expected failures are
/// caught inside each source and come back as empty lists; an `Err` that a
/// source lets escape is counted and propagated, aborting the whole pass.
pub async fn aggregate(
    sources: &[Arc<dyn FlightSource>],
    scraper: &dyn ScrapeSource,
    request: &UserSearchRequest,
    cancel: &CancellationToken,
) -> Result<Vec<Trip>> {
    ensure_metrics_described();

    let searches = sources.iter().map(|s| s.search(request, cancel));
    let outcomes = join_all(searches).await;

    let mut raw: Vec<Trip> = Vec::new();
    for (source, outcome) in sources.iter().zip(outcomes) {
        match outcome {
            Ok(mut trips) => raw.append(&mut trips),
            Err(e) => {
                counter!("source_errors_total").increment(1);
                return Err(e).with_context(|| format!("source {} failed", source.name()));
            }
        }
    }

    let findings = match scraper.scrape(request, cancel).await {
        Ok(findings) => findings,
        Err(e) => {
            counter!("source_errors_total").increment(1);
            return Err(e).context("scrape pass failed");
        }
    };
    raw.extend(findings.into_iter().map(|f| f.trip));

    let (kept, filtered_cnt, dedup_cnt) = filter_and_dedup(raw, request.max_stops);

    counter!("search_trips_total").increment(kept.len() as u64);
    counter!("search_filtered_total").increment(filtered_cnt as u64);
    counter!("search_dedup_total").increment(dedup_cnt as u64);
    gauge!("cycle_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    Ok(kept)
}
