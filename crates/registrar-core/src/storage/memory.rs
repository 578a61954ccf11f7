//! In-memory binding store

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::trace;

use super::{BindingStore, StoreResult};

#[derive(Debug, Clone)]
struct StoredEntry {
    fields: HashMap<String, String>,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Writes between full sweeps of lapsed keys
pub const DEFAULT_SWEEP_EVERY: usize = 64;

/// [`BindingStore`] over a `DashMap`.
///
/// Expired keys are dropped when touched. Keys nobody touches again are
/// swept by [`purge_expired`](Self::purge_expired), which also runs on
/// every `sweep_every`-th write, so a store that keeps taking REGISTERs
/// stays bounded without a background task.
#[derive(Debug)]
pub struct MemoryBindingStore {
    entries: DashMap<String, StoredEntry>,
    writes: AtomicUsize,
    sweep_every: usize,
}

impl Default for MemoryBindingStore {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            writes: AtomicUsize::new(0),
            sweep_every: DEFAULT_SWEEP_EVERY,
        }
    }
}

impl MemoryBindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sweep after every `writes` writes; 0 disables the write-driven sweep
    pub fn with_sweep_every(mut self, writes: usize) -> Self {
        self.sweep_every = writes;
        self
    }

    /// Removes every expired key, returning how many went
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            trace!(purged, "Purged expired bindings");
        }
        purged
    }

    /// Number of keys, counting expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sweep_if_due(&self) {
        if self.sweep_every == 0 {
            return;
        }
        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % self.sweep_every == 0 {
            self.purge_expired();
        }
    }

    // Drops `key` if it has lapsed; true if it is still live
    fn live(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        self.entries.contains_key(key)
    }
}

#[async_trait]
impl BindingStore for MemoryBindingStore {
    async fn write_fields(&self, key: &str, fields: Vec<(String, String)>) -> StoreResult<()> {
        self.sweep_if_due();
        self.live(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry {
                fields: HashMap::new(),
                expires_at: None,
            });
        entry.fields.extend(fields);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.live(key))
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        if !self.live(key) {
            return Ok(false);
        }
        if ttl.is_zero() {
            return Ok(self.entries.remove(key).is_some());
        }
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                entry.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn read_fields(&self, key: &str) -> StoreResult<Option<HashMap<String, String>>> {
        if !self.live(key) {
            return Ok(None);
        }
        Ok(self.entries.get(key).map(|entry| entry.fields.clone()))
    }

    async fn time_to_live(&self, key: &str) -> StoreResult<Option<Duration>> {
        if !self.live(key) {
            return Ok(None);
        }
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .and_then(|entry| entry.expires_at)
            .map(|at| at.saturating_duration_since(now)))
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}
