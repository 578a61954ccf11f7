//! Binding storage
//!
//! [`BindingStore`] is the hash-with-expiry primitive the registrar writes
//! through (the shape of a Redis `HSET`/`EXISTS`/`EXPIRE` client).
//! [`BindingStoreAdapter`] turns it into binding upserts and lookups.

mod adapter;
mod memory;

pub use adapter::{BindingStoreAdapter, IP_FIELD, PORT_FIELD};
pub use memory::MemoryBindingStore;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

/// Result type for store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Keyed field maps with optional per-key expiry
#[async_trait]
pub trait BindingStore: Send + Sync {
    /// Set `fields` on `key`, creating it if needed. Other fields and any
    /// expiry already on the key are left alone.
    async fn write_fields(&self, key: &str, fields: Vec<(String, String)>) -> StoreResult<()>;

    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Expire `key` after `ttl`; false if the key does not exist.
    /// A zero `ttl` removes the key.
    async fn set_expiry(&self, key: &str, ttl: Duration) -> StoreResult<bool>;

    async fn read_fields(&self, key: &str) -> StoreResult<Option<HashMap<String, String>>>;

    /// Time left on `key`, or `None` when it is absent or never expires
    async fn time_to_live(&self, key: &str) -> StoreResult<Option<Duration>>;

    /// True if a key was removed
    async fn remove(&self, key: &str) -> StoreResult<bool>;
}
