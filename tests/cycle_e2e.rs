// tests/cycle_e2e.rs
// Full cycle through the automation: aggregate -> rank -> merge -> notify
// -> persist, with in-memory doubles for store and channels.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};
use tokio_util::sync::CancellationToken;

use trip_alert::automation::Automation;
use trip_alert::equality::sequences_equal;
use trip_alert::model::{Airport, Flight, Trip, TripPriority, UserSearchRequest};
use trip_alert::notify::{ChannelMux, NotifyChannel};
use trip_alert::scrape::SimpleScraper;
use trip_alert::search::types::FlightSource;
use trip_alert::store::MemoryStore;

fn one_leg_trip(airline: &str, price: f64) -> Trip {
    let tz = FixedOffset::east_opt(0).unwrap();
    let dep = tz.with_ymd_and_hms(2026, 10, 2, 8, 0, 0).unwrap();
    let arr = dep + Duration::hours(12);
    Trip::assemble(
        vec![Flight {
            airline: airline.into(),
            departure_airport: Airport::new("Argentina", "Buenos Aires", "EZE", "Ezeiza"),
            arrival_airport: Airport::new("Spain", "Madrid", "MAD", "Barajas"),
            departure_time: dep,
            arrival_time: arr,
            price,
            duration: arr - dep,
            baggage_included: true,
            baggage_notes: String::new(),
            currency: "USD".into(),
        }],
        "USD",
    )
    .unwrap()
}

fn request() -> UserSearchRequest {
    UserSearchRequest::new(
        "Buenos Aires",
        "Madrid",
        NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        TripPriority::Price,
    )
}

struct StubSource {
    trips: Vec<Trip>,
}

#[async_trait::async_trait]
impl FlightSource for StubSource {
    async fn search(
        &self,
        _request: &UserSearchRequest,
        _cancel: &CancellationToken,
    ) -> Result<Vec<Trip>> {
        Ok(self.trips.clone())
    }

    fn name(&self) -> &str {
        "Stub"
    }
}

struct ExplodingSource;

#[async_trait::async_trait]
impl FlightSource for ExplodingSource {
    async fn search(
        &self,
        _request: &UserSearchRequest,
        _cancel: &CancellationToken,
    ) -> Result<Vec<Trip>> {
        Err(anyhow!("upstream exploded"))
    }

    fn name(&self) -> &str {
        "Exploding"
    }
}

#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingChannel {
    fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl NotifyChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), message.to_string()));
        Ok(())
    }
}

struct BrokenChannel;

#[async_trait::async_trait]
impl NotifyChannel for BrokenChannel {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn send(&self, _recipient: &str, _message: &str) -> Result<()> {
        Err(anyhow!("transport down"))
    }
}

fn automation_with(
    trips: Vec<Trip>,
    store: Arc<MemoryStore>,
    channels: ChannelMux,
) -> Automation {
    let sources: Vec<Arc<dyn FlightSource>> = vec![Arc::new(StubSource { trips })];
    Automation::new(sources, Arc::new(SimpleScraper::new(vec![])), store, channels)
}

#[tokio::test]
async fn change_sends_exactly_one_message_per_channel() {
    let store = Arc::new(MemoryStore::new());
    let chan_a = Arc::new(RecordingChannel::default());
    let chan_b = Arc::new(RecordingChannel::default());
    let mut mux = ChannelMux::new();
    mux.push(chan_a.clone(), "alice");
    mux.push(chan_b.clone(), "bob");

    let automation = automation_with(vec![one_leg_trip("Air One", 100.0)], store.clone(), mux);
    let cancel = CancellationToken::new();
    let outcome = automation.run_cycle(&request(), &cancel).await.unwrap();

    assert!(outcome.changed);
    assert!(outcome.notified);
    assert_eq!(chan_a.sent_count(), 1);
    assert_eq!(chan_b.sent_count(), 1);
    assert_eq!(chan_a.sent.lock().unwrap()[0].0, "alice");
}

#[tokio::test]
async fn identical_second_cycle_stays_silent_but_persists() {
    let store = Arc::new(MemoryStore::new());
    let channel = Arc::new(RecordingChannel::default());
    let mut mux = ChannelMux::new();
    mux.push(channel.clone(), "alice");

    let automation = automation_with(vec![one_leg_trip("Air One", 100.0)], store.clone(), mux);
    let cancel = CancellationToken::new();

    let first = automation.run_cycle(&request(), &cancel).await.unwrap();
    assert!(first.notified);
    let saved_after_first = store.last_saved();

    let second = automation.run_cycle(&request(), &cancel).await.unwrap();
    assert!(!second.changed);
    assert!(!second.notified);
    assert_eq!(channel.sent_count(), 1);
    // Persisted again anyway, with the same top set.
    assert_eq!(store.save_count(), 2);
    assert!(sequences_equal(&store.last_saved(), &saved_after_first));
}

#[tokio::test]
async fn empty_world_persists_empty_and_stays_silent() {
    // Scenario D: no sources produce trips, nothing persisted before.
    let store = Arc::new(MemoryStore::new());
    let channel = Arc::new(RecordingChannel::default());
    let mut mux = ChannelMux::new();
    mux.push(channel.clone(), "alice");

    let automation = automation_with(vec![], store.clone(), mux);
    let cancel = CancellationToken::new();
    let outcome = automation.run_cycle(&request(), &cancel).await.unwrap();

    assert_eq!(outcome.top_len, 0);
    assert!(!outcome.notified);
    assert_eq!(channel.sent_count(), 0);
    assert_eq!(store.save_count(), 1);
    assert!(store.last_saved().is_empty());
}

#[tokio::test]
async fn escaped_source_error_aborts_cycle_without_persisting() {
    // One healthy source, one that errors out: the cycle fails as a whole,
    // so nothing is notified and nothing is written.
    let store = Arc::new(MemoryStore::new());
    let channel = Arc::new(RecordingChannel::default());
    let mut mux = ChannelMux::new();
    mux.push(channel.clone(), "alice");

    let sources: Vec<Arc<dyn FlightSource>> = vec![
        Arc::new(StubSource {
            trips: vec![one_leg_trip("Air One", 100.0)],
        }),
        Arc::new(ExplodingSource),
    ];
    let automation = Automation::new(
        sources,
        Arc::new(SimpleScraper::new(vec![])),
        store.clone(),
        mux,
    );
    let cancel = CancellationToken::new();

    let outcome = automation.run_cycle(&request(), &cancel).await;
    assert!(outcome.is_err());
    assert_eq!(channel.sent_count(), 0);
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn broken_channel_does_not_block_persistence_or_other_channels() {
    let store = Arc::new(MemoryStore::new());
    let healthy = Arc::new(RecordingChannel::default());
    let mut mux = ChannelMux::new();
    mux.push(Arc::new(BrokenChannel), "alice");
    mux.push(healthy.clone(), "bob");

    let automation = automation_with(vec![one_leg_trip("Air One", 100.0)], store.clone(), mux);
    let cancel = CancellationToken::new();
    let outcome = automation.run_cycle(&request(), &cancel).await.unwrap();

    assert!(outcome.notified);
    assert_eq!(healthy.sent_count(), 1);
    assert_eq!(store.save_count(), 1);
}

#[tokio::test]
async fn reranked_order_counts_as_change() {
    // Scenario B: same membership, different order after re-ranking.
    let x = one_leg_trip("X", 100.0);
    let y = one_leg_trip("Y", 110.0);
    // Persisted order claims Y first, ranking by price will put X first.
    let store = Arc::new(MemoryStore::with_initial(vec![y.clone(), x.clone()]));
    let channel = Arc::new(RecordingChannel::default());
    let mut mux = ChannelMux::new();
    mux.push(channel.clone(), "alice");

    let automation = automation_with(vec![], store.clone(), mux);
    let cancel = CancellationToken::new();
    let outcome = automation.run_cycle(&request(), &cancel).await.unwrap();

    assert!(outcome.changed);
    assert_eq!(channel.sent_count(), 1);
    let saved = store.last_saved();
    assert_eq!(saved[0].flights[0].airline, "X");
    assert_eq!(saved[1].flights[0].airline, "Y");
}

#[tokio::test]
async fn report_reaches_channel_with_rendered_content() {
    let store = Arc::new(MemoryStore::new());
    let channel = Arc::new(RecordingChannel::default());
    let mut mux = ChannelMux::new();
    mux.push(channel.clone(), "alice");

    let automation = automation_with(vec![one_leg_trip("Air One", 123.4)], store, mux);
    let cancel = CancellationToken::new();
    automation.run_cycle(&request(), &cancel).await.unwrap();

    let sent = channel.sent.lock().unwrap();
    let message = &sent[0].1;
    assert!(message.starts_with("Change detected in best trips Buenos Aires -> Madrid."));
    assert!(message.contains("#1 - Buenos Aires (EZE) -> Madrid (MAD)"));
    assert!(message.contains("Price: USD 123.40"));
}
