// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod automation;
pub mod catalog;
pub mod config;
pub mod equality;
pub mod merge;
pub mod model;
pub mod notify;
pub mod rank;
pub mod scrape;
pub mod search;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::automation::{Automation, CycleOutcome};
pub use crate::model::{Airport, Finding, Flight, Layover, Trip, TripPriority, UserSearchRequest};
pub use crate::notify::{ChannelMux, NotifyChannel};
pub use crate::search::types::FlightSource;
pub use crate::store::TripStore;
