// src/notify/mod.rs
pub mod telegram;
pub mod whatsapp;

use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use metrics::counter;

use crate::model::{Trip, UserSearchRequest};

/// One outbound notification channel. Implementations that are not fully
/// wired yet must still accept the call (log/queue it) instead of failing.
#[async_trait::async_trait]
pub trait NotifyChannel: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, recipient: &str, message: &str) -> Result<()>;
}

/// Fans one message out to every configured channel. A failing channel is
/// logged and counted; it never stops the remaining channels or the cycle.
#[derive(Default)]
pub struct ChannelMux {
    channels: Vec<(Arc<dyn NotifyChannel>, String)>,
}

impl ChannelMux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, channel: Arc<dyn NotifyChannel>, recipient: &str) {
        self.channels.push((channel, recipient.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Returns the number of channels that failed.
    pub async fn notify_all(&self, message: &str) -> usize {
        let mut failures = 0usize;
        for (channel, recipient) in &self.channels {
            if let Err(e) = channel.send(recipient, message).await {
                tracing::warn!(error = ?e, channel = channel.name(), "notification failed");
                counter!("notify_failures_total").increment(1);
                failures += 1;
            }
        }
        failures
    }
}

fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes().max(0);
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}

/// Render the deterministic multi-line report for a changed top set.
pub fn render_report(request: &UserSearchRequest, trips: &[Trip]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Change detected in best trips {} -> {}.\n",
        request.origin_city, request.destination_city
    ));
    out.push_str(&format!("Priority: {}.\n\n", request.priority));

    for (i, trip) in trips.iter().enumerate() {
        out.push_str(&format!(
            "#{} - {} ({}) -> {} ({})\n",
            i + 1,
            trip.departure_airport.city,
            trip.departure_airport.code,
            trip.arrival_airport.city,
            trip.arrival_airport.code
        ));
        out.push_str(&format!(
            "      Price: {} {:.2} | Stops: {} | Duration: {}\n",
            trip.currency,
            trip.total_price,
            trip.stops(),
            format_duration(trip.total_duration())
        ));
        for flight in &trip.flights {
            let baggage = if flight.baggage_included {
                "included"
            } else {
                flight.baggage_notes.as_str()
            };
            out.push_str(&format!(
                "      Flight {}: {} {} -> {} {} | Price: {} {:.2} | Baggage: {}\n",
                flight.airline,
                flight.departure_airport.code,
                flight.departure_time.format("%d/%m %H:%M"),
                flight.arrival_airport.code,
                flight.arrival_time.format("%d/%m %H:%M"),
                flight.currency,
                flight.price,
                baggage
            ));
        }
        if i + 1 < trips.len() {
            out.push('\n');
        }
    }

    out
}
