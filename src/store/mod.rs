//! Store backends
//!
//! `KeyValueStore` is the seam between the cache and whatever actually holds
//! the bytes. `RemoteStore` speaks RESP to a Redis-compatible server;
//! `MemoryStore` keeps everything in-process.

mod memory;
mod remote;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

use crate::error::StoreError;
use async_trait::async_trait;
use bytes::Bytes;

/// The three primitives the cache needs from a key/value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Backend name for logs ("memory", "resp")
    fn name(&self) -> &'static str;

    /// Write `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Bytes) -> Result<(), StoreError>;

    /// Read the value under `key`; `None` when the key does not exist
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError>;

    /// Remove every key in the store (or the selected database)
    async fn flush_db(&self) -> Result<(), StoreError>;
}
