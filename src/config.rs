// src/config.rs
// File + environment configuration. The TOML file describes the search and
// the automation knobs; credentials and recipients come from env vars so
// they never land in the repo.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{TripPriority, UserSearchRequest};

const ENV_CONFIG_PATH: &str = "TRIP_ALERT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/trip_alert.toml";
const DEFAULT_STORAGE_PATH: &str = "data/best_trips.json";
const DEFAULT_RECIPIENT: &str = "000000";

#[derive(Debug, Deserialize)]
struct FileConfig {
    search: SearchSection,
    #[serde(default)]
    automation: AutomationSection,
}

#[derive(Debug, Deserialize)]
struct SearchSection {
    origin_city: String,
    destination_city: String,
    departure_from: NaiveDate,
    departure_to: NaiveDate,
    priority: String,
    currency: Option<String>,
    max_stops: Option<usize>,
    max_top_results: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct AutomationSection {
    interval_secs: Option<u64>,
    storage_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub request: UserSearchRequest,
    pub interval: Duration,
    pub storage_path: PathBuf,
    pub telegram_recipient: String,
    pub whatsapp_recipient: String,
}

/// Load from `$TRIP_ALERT_CONFIG_PATH`, falling back to
/// `config/trip_alert.toml`.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var(ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let file: FileConfig = toml::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;

    if file.search.departure_to < file.search.departure_from {
        bail!("departure_to must not be earlier than departure_from");
    }
    let Some(priority) = TripPriority::parse(&file.search.priority) else {
        bail!(
            "unknown priority {:?}, expected Price, Time or Stops",
            file.search.priority
        );
    };

    let mut request = UserSearchRequest::new(
        &file.search.origin_city,
        &file.search.destination_city,
        file.search.departure_from,
        file.search.departure_to,
        priority,
    );
    if let Some(currency) = file.search.currency {
        request.currency = currency;
    }
    if let Some(max_stops) = file.search.max_stops {
        request.max_stops = max_stops;
    }
    if let Some(max_top) = file.search.max_top_results {
        request.max_top_results = max_top;
    }

    let interval = Duration::from_secs(
        file.automation.interval_secs.unwrap_or(24 * 3600),
    );
    let storage_path = file
        .automation
        .storage_path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH));

    Ok(AppConfig {
        request,
        interval,
        storage_path,
        telegram_recipient: env_or_default("TRIPALERT_TELEGRAM_CHAT"),
        whatsapp_recipient: env_or_default("TRIPALERT_WHATSAPP_NUMBER"),
    })
}

fn env_or_default(key: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("trip_alert.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn minimal_config_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[search]
origin_city = "Buenos Aires"
destination_city = "Madrid"
departure_from = "2026-10-02"
departure_to = "2026-10-09"
priority = "price"
"#,
        );
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.request.currency, "USD");
        assert_eq!(cfg.request.max_stops, 3);
        assert_eq!(cfg.request.max_top_results, 10);
        assert_eq!(cfg.request.priority, TripPriority::Price);
        assert_eq!(cfg.interval, Duration::from_secs(24 * 3600));
        assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[search]
origin_city = "Neuquen"
destination_city = "Santiago"
departure_from = "2026-10-02"
departure_to = "2026-10-02"
priority = "Stops"
currency = "EUR"
max_stops = 1
max_top_results = 5

[automation]
interval_secs = 3600
storage_path = "/tmp/trips.json"
"#,
        );
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.request.currency, "EUR");
        assert_eq!(cfg.request.max_stops, 1);
        assert_eq!(cfg.request.max_top_results, 5);
        assert_eq!(cfg.request.priority, TripPriority::Stops);
        assert_eq!(cfg.interval, Duration::from_secs(3600));
        assert_eq!(cfg.storage_path, PathBuf::from("/tmp/trips.json"));
    }

    #[serial_test::serial]
    #[test]
    fn recipients_come_from_env_with_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[search]
origin_city = "Buenos Aires"
destination_city = "Madrid"
departure_from = "2026-10-02"
departure_to = "2026-10-09"
priority = "time"
"#,
        );

        std::env::remove_var("TRIPALERT_TELEGRAM_CHAT");
        std::env::remove_var("TRIPALERT_WHATSAPP_NUMBER");
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.telegram_recipient, DEFAULT_RECIPIENT);
        assert_eq!(cfg.whatsapp_recipient, DEFAULT_RECIPIENT);

        std::env::set_var("TRIPALERT_TELEGRAM_CHAT", "123456");
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.telegram_recipient, "123456");
        std::env::remove_var("TRIPALERT_TELEGRAM_CHAT");
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[search]
origin_city = "Buenos Aires"
destination_city = "Madrid"
departure_from = "2026-10-09"
departure_to = "2026-10-02"
priority = "price"
"#,
        );
        assert!(load_from(&path).is_err());
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[search]
origin_city = "Buenos Aires"
destination_city = "Madrid"
departure_from = "2026-10-02"
departure_to = "2026-10-09"
priority = "speed"
"#,
        );
        assert!(load_from(&path).is_err());
    }
}
