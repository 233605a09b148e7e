//! FerrumCache - random-key cache over a Redis-compatible store
//!
//! Each stored value gets a fresh UUID key; reads hand back raw bytes or
//! run them through a `Transform`. The store itself (persistence, eviction,
//! replication) stays on the server side.
//!
//! Layering, bottom-up:
//! - `protocol`: RESP2 frames, no I/O
//! - `client`: one TCP connection doing request/reply
//! - `store`: the `KeyValueStore` seam, remote and in-memory backends
//! - `cache`: key generation and typed retrieval

pub mod protocol;
pub mod client;
pub mod store;
pub mod value;
pub mod transform;
pub mod config;
pub mod error;
pub mod cache;

#[cfg(test)]
pub(crate) mod testing;

/// Re-export commonly used types
pub use cache::{Cache, generate_key};
pub use config::CacheConfig;
pub use error::{CacheError, StoreError, TransformError};
pub use store::{KeyValueStore, MemoryStore, RemoteStore};
pub use transform::{ParseFloat, ParseInt, Raw, Transform, Utf8};
pub use value::StoreValue;
