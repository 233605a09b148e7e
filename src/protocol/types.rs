//! RESP2 value types

use bytes::Bytes;
use std::fmt;

/// A single RESP2 frame, either a request we send or a reply we receive
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    /// Simple strings: +OK\r\n
    SimpleString(String),

    /// Errors: -ERR message\r\n
    Error(String),

    /// Integers: :1000\r\n
    Integer(i64),

    /// Bulk strings: $6\r\nfoobar\r\n
    BulkString(Bytes),

    /// Null bulk string ($-1\r\n) or null array (*-1\r\n)
    Null,

    /// Arrays: *2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n
    Array(Vec<RespValue>),
}

impl RespValue {
    pub fn simple_string(s: impl Into<String>) -> Self {
        RespValue::SimpleString(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        RespValue::Error(s.into())
    }

    pub fn bulk_string(b: impl Into<Bytes>) -> Self {
        RespValue::BulkString(b.into())
    }

    /// Build a request frame: an array of bulk strings, command name first.
    ///
    /// ```
    /// use ferrumcache::protocol::RespValue;
    ///
    /// let get = RespValue::command(["GET", "mykey"]);
    /// assert_eq!(get.command_name().as_deref(), Some("GET"));
    /// ```
    pub fn command<I, B>(parts: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        RespValue::Array(parts.into_iter().map(|p| RespValue::BulkString(p.into())).collect())
    }

    /// Upper-cased command name of a request frame
    pub fn command_name(&self) -> Option<String> {
        let first = self.as_array()?.first()?.as_bulk_string()?;
        std::str::from_utf8(first).ok().map(|s| s.to_ascii_uppercase())
    }

    pub fn as_array(&self) -> Option<&Vec<RespValue>> {
        match self {
            RespValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_bulk_string(&self) -> Option<&Bytes> {
        match self {
            RespValue::BulkString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// True for the `+OK` status reply
    pub fn is_ok(&self) -> bool {
        matches!(self, RespValue::SimpleString(s) if s == "OK")
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::SimpleString(s) => write!(f, "SimpleString({})", s),
            RespValue::Error(e) => write!(f, "Error({})", e),
            RespValue::Integer(i) => write!(f, "Integer({})", i),
            RespValue::BulkString(b) => write!(f, "BulkString({} bytes)", b.len()),
            RespValue::Null => write!(f, "Null"),
            RespValue::Array(arr) => match self.command_name() {
                Some(name) => write!(f, "Command({}, {} args)", name, arr.len() - 1),
                None => write!(f, "Array({} elements)", arr.len()),
            },
        }
    }
}

/// RESP parsing errors
#[derive(Debug, Clone, PartialEq)]
pub enum RespError {
    /// Invalid protocol format
    InvalidProtocol(String),

    /// Invalid UTF-8 in a line that must be text
    InvalidUtf8,

    /// Length or integer field is not a valid i64
    InvalidNumber(String),
}

impl fmt::Display for RespError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespError::InvalidProtocol(msg) => write!(f, "Invalid protocol: {}", msg),
            RespError::InvalidUtf8 => write!(f, "Invalid UTF-8"),
            RespError::InvalidNumber(s) => write!(f, "Invalid number: {:?}", s),
        }
    }
}

impl std::error::Error for RespError {}
