//! RESP2 parser and encoder

use super::types::{RespValue, RespError};
use bytes::{Buf, BufMut, Bytes, BytesMut};

const CRLF: &[u8] = b"\r\n";

/// Largest bulk string accepted, same limit as Redis' proto-max-bulk-len
pub const MAX_BULK_LEN: i64 = 512 * 1024 * 1024;

/// Smallest possible encoded element (`+\r\n`)
const MIN_FRAME_LEN: usize = 3;

/// RESP2 Parser
pub struct RespParser;

impl RespParser {
    /// Parse one RESP value from the front of `buf`
    ///
    /// Returns Ok(Some(value)) and consumes its bytes if a complete value is buffered,
    /// Ok(None) without consuming anything if more data is needed,
    /// Err(e) if the buffer holds something that is not RESP2
    pub fn parse(buf: &mut BytesMut) -> Result<Option<RespValue>, RespError> {
        match Self::parse_at(&buf[..], 0)? {
            Some((value, end)) => {
                buf.advance(end);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Parse the value starting at `pos`, returning it with the offset just past it
    fn parse_at(buf: &[u8], pos: usize) -> Result<Option<(RespValue, usize)>, RespError> {
        let Some(&prefix) = buf.get(pos) else {
            return Ok(None);
        };
        let Some((line, next)) = Self::line_at(buf, pos + 1) else {
            return Ok(None);
        };

        match prefix {
            b'+' => {
                let s = Self::utf8(line)?;
                Ok(Some((RespValue::SimpleString(s), next)))
            }
            b'-' => {
                let s = Self::utf8(line)?;
                Ok(Some((RespValue::Error(s), next)))
            }
            b':' => Ok(Some((RespValue::Integer(Self::number(line)?), next))),
            b'$' => Self::parse_bulk_string(buf, Self::number(line)?, next),
            b'*' => Self::parse_array(buf, Self::number(line)?, next),
            other => Err(RespError::InvalidProtocol(format!(
                "Unknown type prefix: {}",
                other as char
            ))),
        }
    }

    /// Bulk string body: $6\r\nfoobar\r\n or $-1\r\n (null)
    fn parse_bulk_string(
        buf: &[u8],
        len: i64,
        start: usize,
    ) -> Result<Option<(RespValue, usize)>, RespError> {
        if len == -1 {
            return Ok(Some((RespValue::Null, start)));
        }
        if !(0..=MAX_BULK_LEN).contains(&len) {
            return Err(RespError::InvalidProtocol(format!(
                "Invalid bulk string length: {}",
                len
            )));
        }

        let end = start + len as usize;
        if buf.len() < end + CRLF.len() {
            return Ok(None);
        }
        if &buf[end..end + CRLF.len()] != CRLF {
            return Err(RespError::InvalidProtocol(
                "Missing CRLF after bulk string data".to_string(),
            ));
        }

        let data = Bytes::copy_from_slice(&buf[start..end]);
        Ok(Some((RespValue::BulkString(data), end + CRLF.len())))
    }

    /// Array body: *2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n or *-1\r\n (null)
    fn parse_array(
        buf: &[u8],
        count: i64,
        start: usize,
    ) -> Result<Option<(RespValue, usize)>, RespError> {
        if count == -1 {
            return Ok(Some((RespValue::Null, start)));
        }
        if count < 0 {
            return Err(RespError::InvalidProtocol(format!(
                "Invalid array count: {}",
                count
            )));
        }

        // The count comes off the wire; never reserve more than the buffered bytes can hold
        let buffered = buf.len().saturating_sub(start) / MIN_FRAME_LEN;
        let mut elements = Vec::with_capacity(buffered.min(count as usize));
        let mut pos = start;
        for _ in 0..count {
            match Self::parse_at(buf, pos)? {
                Some((value, next)) => {
                    elements.push(value);
                    pos = next;
                }
                None => return Ok(None),
            }
        }

        Ok(Some((RespValue::Array(elements), pos)))
    }

    /// Line starting at `pos` (without CRLF) and the offset after its CRLF
    fn line_at(buf: &[u8], pos: usize) -> Option<(&[u8], usize)> {
        let rest = buf.get(pos..)?;
        let len = rest.windows(2).position(|w| w == CRLF)?;
        Some((&rest[..len], pos + len + CRLF.len()))
    }

    fn utf8(line: &[u8]) -> Result<String, RespError> {
        String::from_utf8(line.to_vec()).map_err(|_| RespError::InvalidUtf8)
    }

    fn number(line: &[u8]) -> Result<i64, RespError> {
        let s = std::str::from_utf8(line).map_err(|_| RespError::InvalidUtf8)?;
        s.parse::<i64>()
            .map_err(|_| RespError::InvalidNumber(s.to_string()))
    }
}

/// RESP2 Encoder
pub struct RespEncoder;

impl RespEncoder {
    /// Encode a RESP value to bytes
    pub fn encode(value: &RespValue) -> Bytes {
        let mut buf = BytesMut::new();
        Self::encode_to(&mut buf, value);
        buf.freeze()
    }

    /// Encode a RESP value into an existing buffer
    pub fn encode_to(buf: &mut BytesMut, value: &RespValue) {
        match value {
            RespValue::SimpleString(s) => Self::put_line(buf, b'+', s.as_bytes()),
            RespValue::Error(e) => Self::put_line(buf, b'-', e.as_bytes()),
            RespValue::Integer(i) => Self::put_line(buf, b':', i.to_string().as_bytes()),
            RespValue::BulkString(bytes) => {
                Self::put_line(buf, b'$', bytes.len().to_string().as_bytes());
                buf.put_slice(bytes);
                buf.put_slice(CRLF);
            }
            RespValue::Null => buf.put_slice(b"$-1\r\n"),
            RespValue::Array(arr) => {
                Self::put_line(buf, b'*', arr.len().to_string().as_bytes());
                for elem in arr {
                    Self::encode_to(buf, elem);
                }
            }
        }
    }

    fn put_line(buf: &mut BytesMut, prefix: u8, body: &[u8]) {
        buf.put_u8(prefix);
        buf.put_slice(body);
        buf.put_slice(CRLF);
    }
}
