// src/scrape.rs
// Scraping-style sources: wrap underlying flight sources and tag the trips
// they surface with provenance.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::model::{Finding, UserSearchRequest};
use crate::search::types::FlightSource;

/// Same contract as [`FlightSource`]: expected failures yield an empty
/// list, an escaping `Err` aborts the aggregation pass.
#[async_trait]
pub trait ScrapeSource: Send + Sync {
    async fn scrape(
        &self,
        request: &UserSearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Finding>>;
}

/// Emulates scraping by re-querying the wrapped sources and surfacing at
/// most two trips per source, each tagged with the source name and URL.
pub struct SimpleScraper {
    wrapped: Vec<Arc<dyn FlightSource>>,
}

const TRIPS_PER_SOURCE: usize = 2;

impl SimpleScraper {
    pub fn new(wrapped: Vec<Arc<dyn FlightSource>>) -> Self {
        Self { wrapped }
    }
}

#[async_trait]
impl ScrapeSource for SimpleScraper {
    async fn scrape(
        &self,
        request: &UserSearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for source in &self.wrapped {
            if cancel.is_cancelled() {
                return Ok(findings);
            }
            let trips = source
                .search(request, cancel)
                .await
                .with_context(|| format!("scraping {}", source.name()))?;
            let url = format!("https://example.com/{}", source.name().to_lowercase());
            for trip in trips.into_iter().take(TRIPS_PER_SOURCE) {
                findings.push(Finding {
                    source_name: format!("{} Scraper", source.name()),
                    source_url: url.clone(),
                    trip,
                });
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TripPriority, UserSearchRequest};
    use crate::search::providers::simulated::SimulatedSource;
    use chrono::NaiveDate;

    fn request() -> UserSearchRequest {
        UserSearchRequest::new(
            "Buenos Aires",
            "Madrid",
            NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 6).unwrap(),
            TripPriority::Price,
        )
    }

    #[tokio::test]
    async fn caps_findings_per_source_and_tags_provenance() {
        let scraper = SimpleScraper::new(vec![
            Arc::new(SimulatedSource::skyscanner()),
            Arc::new(SimulatedSource::amadeus()),
        ]);
        let cancel = CancellationToken::new();
        let findings = scraper.scrape(&request(), &cancel).await.unwrap();

        assert_eq!(findings.len(), 4);
        assert!(findings
            .iter()
            .any(|f| f.source_name == "Skyscanner Scraper"));
        assert!(findings
            .iter()
            .any(|f| f.source_url == "https://example.com/amadeus"));
    }

    #[tokio::test]
    async fn cancelled_scrape_stops_early() {
        let scraper = SimpleScraper::new(vec![Arc::new(SimulatedSource::skyscanner())]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let findings = scraper.scrape(&request(), &cancel).await.unwrap();
        assert!(findings.is_empty());
    }
}
