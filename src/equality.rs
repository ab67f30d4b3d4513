// src/equality.rs
// Structural trip equality, used both for dedup and for change detection.
// Kept as plain functions over the canonical shapes so it can be tested
// against literal fixtures.

use crate::model::{Flight, Trip};

/// Two flights match iff airline, airport codes, both instants and currency
/// agree. Strings compare case-insensitively; price and baggage fields are
/// deliberately ignored.
pub fn flights_equal(a: &Flight, b: &Flight) -> bool {
    a.airline.eq_ignore_ascii_case(&b.airline)
        && a.departure_airport.code.eq_ignore_ascii_case(&b.departure_airport.code)
        && a.arrival_airport.code.eq_ignore_ascii_case(&b.arrival_airport.code)
        && a.departure_time == b.departure_time
        && a.arrival_time == b.arrival_time
        && a.currency.eq_ignore_ascii_case(&b.currency)
}

/// Structural trip equality: endpoints, currency and the ordered flight
/// sequence.
pub fn trips_equal(a: &Trip, b: &Trip) -> bool {
    if !a.departure_airport.code.eq_ignore_ascii_case(&b.departure_airport.code)
        || !a.arrival_airport.code.eq_ignore_ascii_case(&b.arrival_airport.code)
        || !a.currency.eq_ignore_ascii_case(&b.currency)
        || a.flights.len() != b.flights.len()
    {
        return false;
    }
    a.flights
        .iter()
        .zip(b.flights.iter())
        .all(|(x, y)| flights_equal(x, y))
}

/// Drop structural duplicates, first-seen wins, input order otherwise
/// preserved.
pub fn dedup_trips(trips: Vec<Trip>) -> Vec<Trip> {
    let mut kept: Vec<Trip> = Vec::with_capacity(trips.len());
    for trip in trips {
        if !kept.iter().any(|k| trips_equal(k, &trip)) {
            kept.push(trip);
        }
    }
    kept
}

/// Ordered comparison of two trip sequences. Any difference in membership,
/// order or count counts as inequality.
pub fn sequences_equal(a: &[Trip], b: &[Trip]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| trips_equal(x, y))
}
