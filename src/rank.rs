// src/rank.rs
// Priority ordering with deterministic tie-breaks.

use crate::model::{Trip, TripPriority};

/// Order trips by the selected priority. `sort_by` is stable, so relative
/// input order is preserved beyond the declared tie-break and output is
/// deterministic for identical inputs.
pub fn order_trips(mut trips: Vec<Trip>, priority: TripPriority) -> Vec<Trip> {
    match priority {
        TripPriority::Price => trips.sort_by(|a, b| {
            a.total_price
                .total_cmp(&b.total_price)
                .then_with(|| a.total_duration().cmp(&b.total_duration()))
        }),
        TripPriority::Time => trips.sort_by(|a, b| {
            a.total_duration()
                .cmp(&b.total_duration())
                .then_with(|| a.total_price.total_cmp(&b.total_price))
        }),
        TripPriority::Stops => trips.sort_by(|a, b| {
            a.stops()
                .cmp(&b.stops())
                .then_with(|| a.total_price.total_cmp(&b.total_price))
        }),
    }
    trips
}
