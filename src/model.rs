// src/model.rs
// Canonical trip shapes every source normalizes into.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialize/deserialize `chrono::Duration` as whole seconds.
pub mod duration_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(de)?;
        Ok(Duration::seconds(secs))
    }
}

/// Country/city/IATA-code/display-name tuple. Identity for comparison
/// purposes is the IATA code, case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub country: String,
    pub city: String,
    pub code: String,
    pub name: String,
}

impl Airport {
    pub fn new(country: &str, city: &str, code: &str, name: &str) -> Self {
        Self {
            country: country.to_string(),
            city: city.to_string(),
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} ({})", self.city, self.country, self.code)
    }
}

/// One operated segment within a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub airline: String,
    pub departure_airport: Airport,
    pub arrival_airport: Airport,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
    pub price: f64,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    pub baggage_included: bool,
    pub baggage_notes: String,
    pub currency: String,
}

/// Wait between two consecutive flights. Derived, never user-supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layover {
    pub airport: Airport,
    #[serde(with = "duration_secs")]
    pub waiting_time: Duration,
}

/// An ordered, non-empty sequence of flights considered as one purchasable
/// itinerary, plus the layovers between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub flights: Vec<Flight>,
    pub layovers: Vec<Layover>,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub total_price: f64,
    pub currency: String,
    pub departure_airport: Airport,
    pub arrival_airport: Airport,
}

impl Trip {
    /// Build a trip from its segments, deriving layovers, endpoints and the
    /// total price. Returns `None` for an empty segment list.
    /// Layover waiting time is clamped to zero when an adapter emits
    /// overlapping timestamps.
    pub fn assemble(flights: Vec<Flight>, currency: &str) -> Option<Self> {
        let first = flights.first()?.clone();
        let last = flights.last()?.clone();

        let mut layovers = Vec::with_capacity(flights.len().saturating_sub(1));
        for pair in flights.windows(2) {
            let wait = pair[1].departure_time - pair[0].arrival_time;
            layovers.push(Layover {
                airport: pair[1].departure_airport.clone(),
                waiting_time: wait.max(Duration::zero()),
            });
        }

        let total_price = flights.iter().map(|f| f.price).sum();

        Some(Self {
            start_time: first.departure_time,
            end_time: last.arrival_time,
            total_price,
            currency: currency.to_string(),
            departure_airport: first.departure_airport,
            arrival_airport: last.arrival_airport,
            flights,
            layovers,
        })
    }

    pub fn stops(&self) -> usize {
        self.flights.len().saturating_sub(1)
    }

    pub fn total_duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// Ordering criterion selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripPriority {
    Price,
    Time,
    Stops,
}

impl TripPriority {
    /// Case-insensitive parse, used by the config layer.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Some(Self::Price),
            "time" => Some(Self::Time),
            "stops" => Some(Self::Stops),
            _ => None,
        }
    }
}

impl fmt::Display for TripPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Price => "Price",
            Self::Time => "Time",
            Self::Stops => "Stops",
        };
        f.write_str(s)
    }
}

/// Search parameters, immutable for the lifetime of one automation run.
#[derive(Debug, Clone)]
pub struct UserSearchRequest {
    pub origin_city: String,
    pub destination_city: String,
    pub departure_from: NaiveDate,
    pub departure_to: NaiveDate,
    pub priority: TripPriority,
    pub currency: String,
    pub max_stops: usize,
    pub max_top_results: usize,
}

impl UserSearchRequest {
    pub fn new(
        origin_city: &str,
        destination_city: &str,
        departure_from: NaiveDate,
        departure_to: NaiveDate,
        priority: TripPriority,
    ) -> Self {
        Self {
            origin_city: origin_city.to_string(),
            destination_city: destination_city.to_string(),
            departure_from,
            departure_to,
            priority,
            currency: "USD".to_string(),
            max_stops: 3,
            max_top_results: 10,
        }
    }
}

/// Provenance-tagged trip surfaced by a scraping-style source.
#[derive(Debug, Clone)]
pub struct Finding {
    pub source_name: String,
    pub source_url: String,
    pub trip: Trip,
}
