//! TripAlert — Binary Entrypoint
//! Boots the long-running watcher: loads configuration, wires sources,
//! scraper, store and notification channels, then runs cycles until Ctrl+C.

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trip_alert::automation::Automation;
use trip_alert::config;
use trip_alert::notify::telegram::TelegramChannel;
use trip_alert::notify::whatsapp::DeferredWhatsAppChannel;
use trip_alert::notify::ChannelMux;
use trip_alert::scrape::SimpleScraper;
use trip_alert::search::providers::kiwi::KiwiSource;
use trip_alert::search::providers::simulated::SimulatedSource;
use trip_alert::search::types::FlightSource;
use trip_alert::store::JsonTripStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trip_alert=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when the vars come from the real env.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = config::load_default()?;
    tracing::info!(
        origin = %cfg.request.origin_city,
        destination = %cfg.request.destination_city,
        priority = %cfg.request.priority,
        "starting trip watcher"
    );

    let sources: Vec<Arc<dyn FlightSource>> = vec![
        Arc::new(SimulatedSource::skyscanner()),
        Arc::new(KiwiSource::from_env()),
        Arc::new(SimulatedSource::amadeus()),
        Arc::new(SimulatedSource::google_flights()),
    ];
    let scraper = Arc::new(SimpleScraper::new(sources.clone()));
    let store = Arc::new(JsonTripStore::new(&cfg.storage_path));

    let mut channels = ChannelMux::new();
    channels.push(
        Arc::new(TelegramChannel::from_env()),
        &cfg.telegram_recipient,
    );
    channels.push(
        Arc::new(DeferredWhatsAppChannel::new()),
        &cfg.whatsapp_recipient,
    );

    let automation =
        Automation::new(sources, scraper, store, channels).with_interval(cfg.interval);

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            signal_cancel.cancel();
        }
    });

    automation.run(&cfg.request, cancel).await;
    Ok(())
}
