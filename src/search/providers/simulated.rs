// src/search/providers/simulated.rs
// Deterministic generator standing in for real provider integrations, so
// the pipeline can run end to end without live credentials.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Weekday};
use tokio_util::sync::CancellationToken;

use crate::catalog;
use crate::model::{Airport, Flight, Trip, UserSearchRequest};
use crate::search::types::FlightSource;

/// Configurable simulated source. Each named provider is this generator
/// with its own tuning constants.
pub struct SimulatedSource {
    provider: String,
    airline: String,
    base_duration: Duration,
    base_price: f64,
    price_factor: f64,
    duration_offset: Duration,
    /// Supported (origin city, destination city) pairs; empty means all
    /// routes are supported.
    routes: Vec<(String, String)>,
}

impl SimulatedSource {
    pub fn new(provider: &str, airline: &str, base_duration: Duration, base_price: f64) -> Self {
        Self {
            provider: provider.to_string(),
            airline: airline.to_string(),
            base_duration,
            base_price,
            price_factor: 1.0,
            duration_offset: Duration::zero(),
            routes: Vec::new(),
        }
    }

    pub fn with_price_factor(mut self, factor: f64) -> Self {
        self.price_factor = factor;
        self
    }

    pub fn with_duration_offset(mut self, offset: Duration) -> Self {
        self.duration_offset = offset;
        self
    }

    pub fn with_routes(mut self, routes: &[(&str, &str)]) -> Self {
        self.routes = routes
            .iter()
            .map(|(o, d)| (o.to_string(), d.to_string()))
            .collect();
        self
    }

    pub fn skyscanner() -> Self {
        Self::new("Skyscanner", "SkyScanner Airways", Duration::minutes(150), 120.0)
            .with_price_factor(0.92)
    }

    pub fn kiwi_local() -> Self {
        Self::new("Kiwi", "Kiwi Connect", Duration::minutes(186), 135.0).with_price_factor(1.05)
    }

    pub fn amadeus() -> Self {
        Self::new("Amadeus", "Amadeus Global", Duration::minutes(168), 142.0)
            .with_price_factor(0.99)
            .with_duration_offset(Duration::minutes(25))
    }

    pub fn google_flights() -> Self {
        Self::new("GoogleFlights", "Google Flights Aggregator", Duration::minutes(156), 150.0)
            .with_price_factor(0.88)
            .with_routes(&[
                ("Neuquen", "Buenos Aires"),
                ("Buenos Aires", "Madrid"),
                ("Buenos Aires", "Barcelona"),
                ("Buenos Aires", "Santiago"),
                ("Buenos Aires", "Sao Paulo"),
                ("Buenos Aires", "Miami"),
                ("Madrid", "Barcelona"),
                ("Madrid", "Rome"),
            ])
    }

    fn route_supported(&self, origin: &Airport, destination: &Airport) -> bool {
        self.routes.is_empty()
            || self.routes.iter().any(|(o, d)| {
                o.eq_ignore_ascii_case(&origin.city) && d.eq_ignore_ascii_case(&destination.city)
            })
    }
}

/// Weekend departures price higher, Mondays slightly lower.
fn weekday_price_modifier(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Fri | Weekday::Sun => 1.25,
        Weekday::Sat => 1.15,
        Weekday::Mon => 0.95,
        _ => 1.0,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn dates_inclusive(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |d| *d <= to)
}

#[async_trait]
impl FlightSource for SimulatedSource {
    async fn search(
        &self,
        request: &UserSearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Trip>> {
        let origins = catalog::find_by_city(&request.origin_city);
        let destinations = catalog::find_by_city(&request.destination_city);

        // Unknown city: expected-empty, not an error.
        if origins.is_empty() || destinations.is_empty() {
            tracing::debug!(
                provider = %self.provider,
                origin = %request.origin_city,
                destination = %request.destination_city,
                "no catalog match for route"
            );
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for origin in &origins {
            for destination in &destinations {
                if !self.route_supported(origin, destination) {
                    continue;
                }
                for date in dates_inclusive(request.departure_from, request.departure_to) {
                    if cancel.is_cancelled() {
                        return Ok(results);
                    }

                    let departure_time = FixedOffset::east_opt(0)
                        .expect("zero offset is valid")
                        .from_utc_datetime(&date.and_hms_opt(8, 0, 0).expect("08:00 is valid"));
                    let duration = self.base_duration + self.duration_offset;
                    let arrival_time = departure_time + duration;
                    let baggage_included =
                        !origin.country.eq_ignore_ascii_case(&destination.country);
                    let baggage_notes = if baggage_included {
                        "Checked bag included".to_string()
                    } else {
                        "Checked baggage costs extra".to_string()
                    };
                    let price = round2(
                        self.base_price * self.price_factor * weekday_price_modifier(date),
                    );

                    let flight = Flight {
                        airline: self.airline.clone(),
                        departure_airport: (*origin).clone(),
                        arrival_airport: (*destination).clone(),
                        departure_time,
                        arrival_time,
                        price,
                        duration,
                        baggage_included,
                        baggage_notes,
                        currency: request.currency.clone(),
                    };

                    if let Some(trip) = Trip::assemble(vec![flight], &request.currency) {
                        results.push(trip);
                    }
                }
            }
        }

        Ok(results)
    }

    fn name(&self) -> &str {
        &self.provider
    }
}
