//! Demo that pushes a sample report through the channel mux (stdout/log
//! only when channels are disabled).

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, TimeZone};
use trip_alert::model::{Airport, Flight, Trip, TripPriority, UserSearchRequest};
use trip_alert::notify::telegram::TelegramChannel;
use trip_alert::notify::whatsapp::DeferredWhatsAppChannel;
use trip_alert::notify::{render_report, ChannelMux};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    let _ = dotenvy::dotenv();

    let tz = FixedOffset::west_opt(3 * 3600).unwrap();
    let dep = tz.with_ymd_and_hms(2026, 10, 2, 8, 0, 0).unwrap();
    let arr = tz.with_ymd_and_hms(2026, 10, 2, 20, 30, 0).unwrap();
    let trip = Trip::assemble(
        vec![Flight {
            airline: "SkyScanner Airways".into(),
            departure_airport: Airport::new("Argentina", "Buenos Aires", "EZE", "Ezeiza"),
            arrival_airport: Airport::new("Spain", "Madrid", "MAD", "Barajas"),
            departure_time: dep,
            arrival_time: arr,
            price: 110.4,
            duration: arr - dep,
            baggage_included: true,
            baggage_notes: String::new(),
            currency: "USD".into(),
        }],
        "USD",
    )
    .expect("non-empty trip");

    let request = UserSearchRequest::new(
        "Buenos Aires",
        "Madrid",
        NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        TripPriority::Price,
    );
    let report = render_report(&request, &[trip]);
    println!("{report}");

    let whatsapp = Arc::new(DeferredWhatsAppChannel::new());
    let mut mux = ChannelMux::new();
    mux.push(Arc::new(TelegramChannel::from_env()), "000000");
    mux.push(whatsapp.clone(), "000000");

    let failures = mux.notify_all(&report).await;
    println!(
        "notify-demo done ({} failures, {} queued for WhatsApp)",
        failures,
        whatsapp.pending().len()
    );
}
