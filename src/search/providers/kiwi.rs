// src/search/providers/kiwi.rs
// Live itinerary-feed adapter with tolerant parsing. Malformed records are
// skipped one by one; when the feed is unreachable, unparseable or empty,
// the adapter degrades to its local simulated generator so a cycle always
// has Kiwi data to work with.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::catalog;
use crate::model::{Airport, Flight, Trip, UserSearchRequest};
use crate::search::providers::simulated::SimulatedSource;
use crate::search::types::FlightSource;

pub struct KiwiSource {
    mode: Mode,
    fallback: SimulatedSource,
}

enum Mode {
    /// No feed configured; always use the local generator.
    Local,
    /// Canned feed body, for tests.
    Fixture(String),
    /// Live feed.
    Http { base_url: String, client: reqwest::Client },
}

const ENV_FEED_URL: &str = "TRIPALERT_KIWI_API_URL";

impl KiwiSource {
    /// Live mode when `TRIPALERT_KIWI_API_URL` is set, local generator
    /// otherwise.
    pub fn from_env() -> Self {
        let mode = match std::env::var(ENV_FEED_URL) {
            Ok(url) if !url.trim().is_empty() => Mode::Http {
                base_url: url.trim().to_string(),
                client: reqwest::Client::new(),
            },
            _ => Mode::Local,
        };
        Self {
            mode,
            fallback: SimulatedSource::kiwi_local(),
        }
    }

    pub fn from_fixture(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
            fallback: SimulatedSource::kiwi_local(),
        }
    }

    fn feed_url(base_url: &str, request: &UserSearchRequest) -> Option<String> {
        let origin = catalog::find_by_city(&request.origin_city).into_iter().next()?;
        let destination = catalog::find_by_city(&request.destination_city)
            .into_iter()
            .next()?;
        Some(format!(
            "{}?fly_from={}&fly_to={}&date_from={}&date_to={}&curr={}",
            base_url,
            origin.code,
            destination.code,
            request.departure_from,
            request.departure_to,
            request.currency
        ))
    }

    fn parse_feed(body: &str, request: &UserSearchRequest) -> Result<Vec<Trip>> {
        let feed: KiwiFeed = serde_json::from_str(body).context("parsing kiwi feed json")?;
        let mut trips = Vec::with_capacity(feed.data.len());
        let mut skipped = 0usize;
        for itinerary in feed.data {
            match convert_itinerary(itinerary, request) {
                Some(trip) => trips.push(trip),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "kiwi feed: skipped malformed itineraries");
        }
        Ok(trips)
    }
}

#[async_trait]
impl FlightSource for KiwiSource {
    async fn search(
        &self,
        request: &UserSearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Trip>> {
        let parsed = match &self.mode {
            Mode::Local => Ok(Vec::new()),
            Mode::Fixture(body) => Self::parse_feed(body, request),
            Mode::Http { base_url, client } => {
                let Some(url) = Self::feed_url(base_url, request) else {
                    // Unknown city, nothing to query upstream.
                    return self.fallback.search(request, cancel).await;
                };
                let body = tokio::select! {
                    _ = cancel.cancelled() => return Ok(Vec::new()),
                    res = async {
                        let resp = client.get(&url).send().await.context("kiwi feed get")?;
                        resp.error_for_status()
                            .context("kiwi feed non-2xx")?
                            .text()
                            .await
                            .context("kiwi feed body")
                    } => res,
                };
                body.and_then(|b| Self::parse_feed(&b, request))
            }
        };

        match parsed {
            Ok(trips) if !trips.is_empty() => Ok(trips),
            Ok(_) => {
                if !matches!(self.mode, Mode::Local) {
                    tracing::warn!(provider = "Kiwi", "feed yielded no trips, using local generator");
                }
                self.fallback.search(request, cancel).await
            }
            Err(e) => {
                tracing::warn!(provider = "Kiwi", error = ?e, "feed failed, using local generator");
                metrics::counter!("source_errors_total").increment(1);
                self.fallback.search(request, cancel).await
            }
        }
    }

    fn name(&self) -> &str {
        "Kiwi"
    }
}

// --- lenient wire shapes ---
// Every field is optional; conversion decides record by record whether
// enough survived to build a trip.

#[derive(Debug, Deserialize)]
struct KiwiFeed {
    #[serde(default)]
    data: Vec<KiwiItinerary>,
}

#[derive(Debug, Deserialize)]
struct KiwiItinerary {
    #[serde(default)]
    route: Vec<KiwiLeg>,
    price: Option<f64>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KiwiLeg {
    airline: Option<String>,
    #[serde(rename = "flyFrom")]
    fly_from: Option<String>,
    #[serde(rename = "flyTo")]
    fly_to: Option<String>,
    local_departure: Option<String>,
    local_arrival: Option<String>,
    price: Option<f64>,
    #[serde(default)]
    bags_included: bool,
    bags_note: Option<String>,
}

fn airport_for_code(code: &str) -> Airport {
    catalog::find_by_code(code)
        .cloned()
        .unwrap_or_else(|| Airport::new("Unknown", "Unknown", code, "Unlisted airport"))
}

fn parse_time(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value?).ok()
}

/// Convert one itinerary, or `None` when a required piece is missing or
/// unparseable. An itinerary price with no per-leg prices is split evenly
/// across the legs.
fn convert_itinerary(itinerary: KiwiItinerary, request: &UserSearchRequest) -> Option<Trip> {
    if itinerary.route.is_empty() {
        return None;
    }

    let currency = itinerary
        .currency
        .unwrap_or_else(|| request.currency.clone());
    let leg_count = itinerary.route.len();
    let split_price = itinerary.price.map(|p| p / leg_count as f64);

    let mut flights = Vec::with_capacity(leg_count);
    for leg in itinerary.route {
        let departure_time = parse_time(leg.local_departure.as_deref())?;
        let arrival_time = parse_time(leg.local_arrival.as_deref())?;
        let from = leg.fly_from?;
        let to = leg.fly_to?;
        let price = leg.price.or(split_price)?;

        flights.push(Flight {
            airline: leg.airline.unwrap_or_else(|| "Kiwi Connect".to_string()),
            departure_airport: airport_for_code(&from),
            arrival_airport: airport_for_code(&to),
            departure_time,
            arrival_time,
            price,
            // Clamped so an out-of-order pair of instants cannot produce a
            // negative duration.
            duration: (arrival_time - departure_time).max(Duration::zero()),
            baggage_included: leg.bags_included,
            baggage_notes: leg.bags_note.unwrap_or_default(),
            currency: currency.clone(),
        });
    }

    Trip::assemble(flights, &currency)
}
