// src/search/types.rs
use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::model::{Trip, UserSearchRequest};

/// One searchable flight-data source.
///
/// Expected failure modes (unknown route, missing credentials, upstream
/// error) are absorbed by the implementation and yield an empty list; only
/// genuinely unexpected failures surface as errors, and one of those aborts
/// the whole aggregation pass.
#[async_trait::async_trait]
pub trait FlightSource: Send + Sync {
    async fn search(
        &self,
        request: &UserSearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Trip>>;

    fn name(&self) -> &str;
}
