//! RESP2 protocol implementation
//!
//! Client-side encoding of requests and parsing of server replies.
//! Nothing here knows about caches or stores.

mod types;
mod resp;

pub use types::{RespValue, RespError};
pub use resp::{RespParser, RespEncoder};
