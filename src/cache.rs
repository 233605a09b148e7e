//! Random-key cache over a key/value store
//!
//! `Cache::store` mints a fresh UUID v4 key per value and returns it;
//! the `get*` family reads it back, optionally converting the bytes.
//! Absent keys come back as `Ok(None)`, never as an error.

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, RemoteStore};
use crate::transform::{ParseFloat, ParseInt, Raw, Transform, Utf8};
use crate::value::StoreValue;
use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

/// Cache handle; owns its store connection for its whole lifetime
pub struct Cache<S = RemoteStore> {
    store: S,
}

impl Cache<RemoteStore> {
    /// Connect with the store's local defaults (127.0.0.1:6379, db 0) and flush it
    pub async fn connect_default() -> Result<Self> {
        Self::connect(&CacheConfig::default()).await
    }

    /// Connect to the configured server, flushing its database if `flush_on_start` is set
    pub async fn connect(config: &CacheConfig) -> Result<Self> {
        let store = RemoteStore::connect(config).await?;
        Self::with_options(store, config.flush_on_start).await
    }
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap `store`, wiping everything already in it
    pub async fn new(store: S) -> Result<Self> {
        Self::with_options(store, true).await
    }

    /// Wrap `store`; `flush` decides whether existing entries are wiped first
    pub async fn with_options(store: S, flush: bool) -> Result<Self> {
        if flush {
            store.flush_db().await?;
            info!("Flushed {} store on cache start", store.name());
        }
        Ok(Cache { store })
    }

    /// Store `value` under a newly generated key and return that key
    pub async fn store(&self, value: impl Into<StoreValue>) -> Result<String> {
        let value = value.into();
        let key = generate_key();
        debug!("Storing {} value under {}", value.type_name(), key);

        self.store.set(&key, value.into()).await?;
        Ok(key)
    }

    /// Raw bytes under `key`
    pub async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.get_with(key, Raw).await
    }

    /// Bytes under `key`, converted by `transform`
    ///
    /// A transform failure is reported as `RetrievalFailure`; no fallback
    /// value is substituted.
    pub async fn get_with<T: Transform>(&self, key: &str, transform: T) -> Result<Option<T::Output>> {
        let Some(raw) = self.store.get(key).await? else {
            debug!("Key {} not found", key);
            return Ok(None);
        };

        transform
            .apply(raw)
            .map(Some)
            .map_err(|source| CacheError::RetrievalFailure {
                key: key.to_string(),
                source,
            })
    }

    /// Value under `key` decoded as UTF-8 text
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, Utf8).await
    }

    /// Value under `key` parsed as a decimal integer
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, ParseInt).await
    }

    /// Value under `key` parsed as a floating-point number
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, ParseFloat).await
    }

    /// Underlying store
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Release the cache, handing back the store
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Fresh random key in hyphenated UUID form
pub fn generate_key() -> String {
    Uuid::new_v4().to_string()
}
