//! Binding upserts on top of a [`BindingStore`]

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{BindingStore, StoreResult};
use crate::error::StoreError;
use crate::types::Binding;

/// Field holding the contact host
pub const IP_FIELD: &str = "ip";
/// Field holding the contact port, as decimal text
pub const PORT_FIELD: &str = "port";

const DEFAULT_KEY_PREFIX: &str = "user";

/// Writes and reads bindings stored as `"{prefix}:{user}" -> {ip, port}`
#[derive(Clone)]
pub struct BindingStoreAdapter {
    store: Arc<dyn BindingStore>,
    key_prefix: String,
}

impl BindingStoreAdapter {
    pub fn new(store: Arc<dyn BindingStore>) -> Self {
        Self {
            store,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn store_key(&self, user: &str) -> String {
        format!("{}:{}", self.key_prefix, user)
    }

    /// Creates or refreshes the binding for `user`, returning what was written.
    ///
    /// Fields are written unconditionally; the expiry is set only if the key
    /// is still there afterwards. Concurrent upserts for one user are last
    /// writer wins.
    pub async fn upsert_binding(
        &self,
        user: &str,
        host: &str,
        port: u16,
        ttl_seconds: u32,
    ) -> StoreResult<Binding> {
        let key = self.store_key(user);

        self.store
            .write_fields(
                &key,
                vec![
                    (IP_FIELD.to_string(), host.to_string()),
                    (PORT_FIELD.to_string(), port.to_string()),
                ],
            )
            .await?;

        let binding = Binding::new(user, host, port, ttl_seconds);
        if !self.store.exists(&key).await? {
            debug!(%key, "Binding gone before its expiry could be set");
            return Ok(binding);
        }

        let ttl = Duration::from_secs(u64::from(ttl_seconds));
        if !self.store.set_expiry(&key, ttl).await? {
            warn!(%key, "Binding vanished while setting its expiry");
        }
        Ok(binding)
    }

    /// Live binding for `user`, if any
    pub async fn lookup_binding(&self, user: &str) -> StoreResult<Option<Binding>> {
        let key = self.store_key(user);
        let Some(fields) = self.store.read_fields(&key).await? else {
            return Ok(None);
        };

        let host = fields
            .get(IP_FIELD)
            .cloned()
            .ok_or_else(|| corrupt(&key, "missing ip field"))?;
        let port = fields
            .get(PORT_FIELD)
            .ok_or_else(|| corrupt(&key, "missing port field"))?
            .parse::<u16>()
            .map_err(|e| corrupt(&key, &format!("invalid port: {}", e)))?;

        match self.store.time_to_live(&key).await? {
            Some(ttl) => Ok(Some(Binding::expiring_in(user, host, port, ttl))),
            // Lapsed between the two reads
            None if !self.store.exists(&key).await? => Ok(None),
            None => Err(corrupt(&key, "binding has no expiry")),
        }
    }
}

fn corrupt(key: &str, detail: &str) -> StoreError {
    StoreError::Corrupt {
        key: key.to_string(),
        detail: detail.to_string(),
    }
}

impl std::fmt::Debug for BindingStoreAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingStoreAdapter")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}
