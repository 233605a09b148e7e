//! RESP client
//!
//! Owns the TCP side of talking to a Redis-compatible server. Higher layers
//! only see `Connection::request`.

mod connection;

pub use connection::Connection;
