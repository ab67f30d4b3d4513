// src/store.rs
// Durable storage for the current best-trip set: one flat JSON file with
// full-replace semantics.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use crate::model::Trip;

#[async_trait]
pub trait TripStore: Send + Sync {
    /// Previously stored trips; empty when nothing is stored yet.
    async fn load(&self) -> Result<Vec<Trip>>;
    /// Replace the stored set. Not an append.
    async fn save(&self, trips: &[Trip]) -> Result<()>;
}

pub struct JsonTripStore {
    path: PathBuf,
}

impl JsonTripStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TripStore for JsonTripStore {
    async fn load(&self) -> Result<Vec<Trip>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))
    }

    async fn save(&self, trips: &[Trip]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }

        // Write-to-temp-then-rename so a reader never observes a partially
        // written file.
        let body = serde_json::to_vec_pretty(trips).context("serializing trips")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &body)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests: remembers every saved set.
pub struct MemoryStore {
    pub saved: std::sync::Mutex<Vec<Vec<Trip>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            saved: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_initial(trips: Vec<Trip>) -> Self {
        Self {
            saved: std::sync::Mutex::new(vec![trips]),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    pub fn last_saved(&self) -> Vec<Trip> {
        self.saved.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Trip>> {
        Ok(self.last_saved())
    }

    async fn save(&self, trips: &[Trip]) -> Result<()> {
        self.saved.lock().unwrap().push(trips.to_vec());
        Ok(())
    }
}
