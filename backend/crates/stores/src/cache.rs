//! In-memory store cache
//!
//! One snapshot of the dataset, reloaded lazily after the TTL expires.
//! Concurrent misses coalesce behind a refresh mutex so a cold start
//! under load reads the file exactly once.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use kernel::error::app_error::{AppResult, ResultExt};
use kernel::error::kind::ErrorKind;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{PlaceDetails, Store, transform_stores};

/// Message served when the dataset cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Error al cargar las tiendas";

/// Snapshot lifetime before the next request triggers a reload
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Whether a request was served from the snapshot or forced a load,
/// surfaced to clients as the `X-Cache` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

struct Entry {
    stores: Arc<Vec<Store>>,
    loaded_at: Instant,
}

/// Lazily-refreshed snapshot of the store dataset
pub struct StoreCache {
    path: PathBuf,
    ttl: Duration,
    entry: RwLock<Option<Entry>>,
    /// Serializes refreshes; waiters re-check the snapshot on wake-up.
    refresh_lock: Mutex<()>,
}

impl StoreCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            entry: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_default_ttl(path: impl Into<PathBuf>) -> Self {
        Self::new(path, DEFAULT_TTL)
    }

    /// Current snapshot, loading it first when absent or expired.
    pub async fn get(&self) -> AppResult<(Arc<Vec<Store>>, CacheStatus)> {
        if let Some(stores) = self.fresh().await {
            return Ok((stores, CacheStatus::Hit));
        }

        let _guard = self.refresh_lock.lock().await;

        // A racing task may have refreshed while this one waited.
        if let Some(stores) = self.fresh().await {
            return Ok((stores, CacheStatus::Hit));
        }

        let stores = self.refresh().await?;
        Ok((stores, CacheStatus::Miss))
    }

    async fn fresh(&self) -> Option<Arc<Vec<Store>>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| e.loaded_at.elapsed() < self.ttl)
            .map(|e| e.stores.clone())
    }

    /// Reload the dataset from disk unconditionally.
    pub async fn refresh(&self) -> AppResult<Arc<Vec<Store>>> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_app_err(ErrorKind::InternalServerError, LOAD_ERROR_MESSAGE)?;
        let data: BTreeMap<String, PlaceDetails> = serde_json::from_slice(&raw)
            .map_app_err(ErrorKind::InternalServerError, LOAD_ERROR_MESSAGE)?;

        let stores = Arc::new(transform_stores(data));
        tracing::info!(count = stores.len(), "Store dataset loaded");

        *self.entry.write().await = Some(Entry {
            stores: stores.clone(),
            loaded_at: Instant::now(),
        });

        Ok(stores)
    }
}
