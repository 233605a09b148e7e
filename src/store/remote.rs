//! RESP-over-TCP store

use super::KeyValueStore;
use crate::client::Connection;
use crate::config::CacheConfig;
use crate::error::StoreError;
use crate::protocol::RespValue;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::info;

/// A Redis-compatible server reached over one TCP connection
///
/// Requests from concurrent callers are serialized on the connection.
pub struct RemoteStore {
    connection: Mutex<Connection>,
    addr: String,
    db: u32,
}

impl RemoteStore {
    /// Connect and select the configured database
    pub async fn connect(config: &CacheConfig) -> Result<Self, StoreError> {
        let addr = config.addr();
        let mut connection = Connection::connect(addr.as_str()).await?;

        if config.db != 0 {
            let reply = connection
                .request(RespValue::command(["SELECT".to_string(), config.db.to_string()]))
                .await?;
            expect_ok("SELECT", reply)?;
            info!("Selected database {} on {}", config.db, addr);
        }

        Ok(RemoteStore {
            connection: Mutex::new(connection),
            addr,
            db: config.db,
        })
    }

    /// Round-trip check; the server answers +PONG
    pub async fn ping(&self) -> Result<(), StoreError> {
        let reply = self.request(RespValue::command(["PING"])).await?;
        match reply {
            RespValue::SimpleString(ref s) if s == "PONG" => Ok(()),
            other => Err(unexpected("PING", &other)),
        }
    }

    async fn request(&self, command: RespValue) -> Result<RespValue, StoreError> {
        self.connection.lock().await.request(command).await
    }
}

#[async_trait]
impl KeyValueStore for RemoteStore {
    fn name(&self) -> &'static str {
        "resp"
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<(), StoreError> {
        let command = RespValue::command([Bytes::from_static(b"SET"), key_bytes(key), value]);
        let reply = self.request(command).await?;
        expect_ok("SET", reply)
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        let command = RespValue::command([Bytes::from_static(b"GET"), key_bytes(key)]);
        match self.request(command).await? {
            RespValue::BulkString(bytes) => Ok(Some(bytes)),
            RespValue::Null => Ok(None),
            other => Err(unexpected("GET", &other)),
        }
    }

    async fn flush_db(&self) -> Result<(), StoreError> {
        let reply = self.request(RespValue::command(["FLUSHDB"])).await?;
        expect_ok("FLUSHDB", reply)?;
        info!("Flushed database {} on {}", self.db, self.addr);
        Ok(())
    }
}

fn key_bytes(key: &str) -> Bytes {
    Bytes::copy_from_slice(key.as_bytes())
}

fn expect_ok(command: &str, reply: RespValue) -> Result<(), StoreError> {
    if reply.is_ok() {
        Ok(())
    } else {
        Err(unexpected(command, &reply))
    }
}

fn unexpected(command: &str, reply: &RespValue) -> StoreError {
    StoreError::UnexpectedReply {
        command: command.to_string(),
        reply: reply.to_string(),
    }
}
