//! Connection configuration

use serde::Deserialize;

/// Default host of a local Redis-compatible server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default RESP port
pub const DEFAULT_PORT: u16 = 6379;

/// How `Cache::connect` reaches and prepares the external store
///
/// Every field has a default, so a partial document deserializes:
/// `{"port": 6380}` keeps the local host, db 0 and flushing on start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Server host name or IP
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logical database index, selected right after connecting
    pub db: u32,

    /// Wipe the selected database when the cache is created.
    /// Destructive: never share a database between unrelated caches with this on.
    pub flush_on_start: bool,
}

impl CacheConfig {
    /// `host:port` for `TcpStream::connect`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db: 0,
            flush_on_start: true,
        }
    }
}
