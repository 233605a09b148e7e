//! Client connection
//!
//! One TCP stream to the store. Each request is encoded as a RESP array,
//! written out, and answered by exactly one reply frame.

use crate::error::StoreError;
use crate::protocol::{RespEncoder, RespParser, RespValue};
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::{debug, info, warn};

/// Client connection, generic over the stream so tests can use in-memory pipes
pub struct Connection<S = TcpStream> {
    /// Underlying stream
    stream: S,

    /// Read buffer; may hold the start of a reply that is still arriving
    read_buffer: BytesMut,

    /// Write buffer
    write_buffer: BytesMut,
}

impl Connection<TcpStream> {
    /// Open a TCP connection to the store
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, StoreError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        if let Ok(peer) = stream.peer_addr() {
            info!("Connected to store at {}", peer);
        }
        Ok(Connection::new(stream))
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Connection {
            stream,
            read_buffer: BytesMut::with_capacity(4096),
            write_buffer: BytesMut::with_capacity(4096),
        }
    }

    /// Send one command and wait for its reply
    ///
    /// Error replies (`-ERR ...`) are returned as `StoreError::Server`.
    pub async fn request(&mut self, command: RespValue) -> Result<RespValue, StoreError> {
        debug!("Sending {}", command);
        self.send(&command).await?;

        let reply = self.read_reply().await?;
        debug!("Reply: {}", reply);

        match reply {
            RespValue::Error(msg) => {
                warn!("Store rejected {}: {}", command, msg);
                Err(StoreError::Server(msg))
            }
            reply => Ok(reply),
        }
    }

    async fn send(&mut self, command: &RespValue) -> Result<(), StoreError> {
        self.write_buffer.clear();
        RespEncoder::encode_to(&mut self.write_buffer, command);

        self.stream.write_all(&self.write_buffer).await?;
        self.stream.flush().await?;

        Ok(())
    }

    /// Read until one complete reply frame is buffered
    async fn read_reply(&mut self) -> Result<RespValue, StoreError> {
        loop {
            match RespParser::parse(&mut self.read_buffer) {
                Ok(Some(reply)) => return Ok(reply),
                Ok(None) => {}
                Err(e) => {
                    // Frame boundaries are lost; later replies cannot be trusted either
                    warn!("Protocol error from store: {}", e);
                    self.read_buffer.clear();
                    return Err(e.into());
                }
            }

            let n = self.stream.read_buf(&mut self.read_buffer).await?;
            if n == 0 {
                if !self.read_buffer.is_empty() {
                    warn!("Store closed connection mid-reply ({} bytes buffered)", self.read_buffer.len());
                }
                return Err(StoreError::ConnectionClosed);
            }

            debug!("Read {} bytes", n);
        }
    }
}
