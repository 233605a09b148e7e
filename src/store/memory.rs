//! In-process store

use super::KeyValueStore;
use crate::error::StoreError;
use async_trait::async_trait;
use bytes::Bytes;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use tokio::sync::RwLock;

type StoreMap = HashMap<Bytes, Bytes, BuildHasherDefault<SipHasher13>>;

/// Key/value map held in memory
///
/// Stands in for the external server in tests, or serves as the backend
/// when no server is wanted. Values are opaque bytes, like on the wire.
pub struct MemoryStore {
    map: RwLock<StoreMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            map: RwLock::new(HashMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            )),
        }
    }

    pub async fn len(&self) -> usize {
        self.map.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<(), StoreError> {
        let key = Bytes::copy_from_slice(key.as_bytes());
        self.map.write().await.insert(key, value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        Ok(self.map.read().await.get(key.as_bytes()).cloned())
    }

    async fn flush_db(&self) -> Result<(), StoreError> {
        self.map.write().await.clear();
        Ok(())
    }
}
