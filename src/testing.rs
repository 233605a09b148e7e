//! In-process RESP servers for tests

use crate::config::CacheConfig;
use crate::protocol::{RespEncoder, RespParser, RespValue};
use bytes::{Bytes, BytesMut};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Value a `FakeServer` refuses to SET, answering like a read-only replica
pub const READONLY_VALUE: &[u8] = b"refuse-write";

/// Minimal Redis stand-in: SET/GET/FLUSHDB/SELECT/PING over one map shared by all connections
pub struct FakeServer {
    pub config: CacheConfig,
    commands: Arc<Mutex<Vec<String>>>,
}

impl FakeServer {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let commands = Arc::new(Mutex::new(Vec::new()));
        let map = Arc::new(Mutex::new(HashMap::new()));

        let log = commands.clone();
        tokio::spawn(async move {
            loop {
                let (socket, _) = listener.accept().await.unwrap();
                tokio::spawn(serve(socket, map.clone(), log.clone()));
            }
        });

        FakeServer {
            config: CacheConfig {
                port,
                ..CacheConfig::default()
            },
            commands,
        }
    }

    /// Command names received so far, in arrival order
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

async fn serve(
    mut socket: TcpStream,
    map: Arc<Mutex<HashMap<Bytes, Bytes>>>,
    log: Arc<Mutex<Vec<String>>>,
) {
    let mut buf = BytesMut::new();
    loop {
        while let Some(frame) = RespParser::parse(&mut buf).unwrap() {
            let reply = execute(&frame, &map, &log);
            socket.write_all(&RespEncoder::encode(&reply)).await.unwrap();
        }

        if socket.read_buf(&mut buf).await.unwrap() == 0 {
            return;
        }
    }
}

fn execute(
    frame: &RespValue,
    map: &Mutex<HashMap<Bytes, Bytes>>,
    log: &Mutex<Vec<String>>,
) -> RespValue {
    let name = frame.command_name().unwrap_or_default();
    log.lock().unwrap().push(name.clone());
    let args = frame.as_array().cloned().unwrap_or_default();
    let arg = |i: usize| args[i].as_bulk_string().cloned().unwrap();

    let mut map = map.lock().unwrap();
    match name.as_str() {
        "SET" if arg(2) == READONLY_VALUE => {
            RespValue::error("READONLY You can't write against a read only replica.")
        }
        "SET" => {
            map.insert(arg(1), arg(2));
            RespValue::simple_string("OK")
        }
        "GET" => map
            .get(&arg(1))
            .cloned()
            .map(RespValue::BulkString)
            .unwrap_or(RespValue::Null),
        "FLUSHDB" => {
            map.clear();
            RespValue::simple_string("OK")
        }
        "SELECT" if arg(1) == "99" => RespValue::error("ERR DB index is out of range"),
        "SELECT" => RespValue::simple_string("OK"),
        "PING" => RespValue::simple_string("PONG"),
        _ => RespValue::error("ERR unknown command"),
    }
}

/// Server that answers the first request on each connection with `reply`, then hangs up
pub async fn spawn_scripted_server(reply: &'static [u8]) -> CacheConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            tokio::spawn(async move {
                let mut buf = BytesMut::new();
                while RespParser::parse(&mut buf).unwrap().is_none() {
                    if socket.read_buf(&mut buf).await.unwrap() == 0 {
                        return;
                    }
                }
                socket.write_all(reply).await.unwrap();
            });
        }
    });

    CacheConfig {
        port,
        flush_on_start: false,
        ..CacheConfig::default()
    }
}
