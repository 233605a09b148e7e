//! Values accepted by `Cache::store`

use bytes::Bytes;

/// The kinds of value the cache stores
///
/// The external store only keeps bytes, so every kind is serialized on
/// write and type information is lost; retrieval picks a transform instead.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    /// UTF-8 text
    Text(String),

    /// Raw bytes, stored verbatim
    Bytes(Bytes),

    /// Signed integer, stored as decimal ASCII
    Integer(i64),

    /// Floating-point number, stored as its shortest round-trip decimal
    Float(f64),
}

impl StoreValue {
    /// Serialize to the bytes written to the store
    pub fn to_bytes(&self) -> Bytes {
        match self {
            StoreValue::Text(s) => Bytes::copy_from_slice(s.as_bytes()),
            StoreValue::Bytes(b) => b.clone(),
            StoreValue::Integer(i) => Bytes::from(i.to_string()),
            StoreValue::Float(f) => Bytes::from(f.to_string()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            StoreValue::Text(_) => "text",
            StoreValue::Bytes(_) => "bytes",
            StoreValue::Integer(_) => "integer",
            StoreValue::Float(_) => "float",
        }
    }
}

impl From<StoreValue> for Bytes {
    fn from(value: StoreValue) -> Self {
        match value {
            StoreValue::Bytes(b) => b,
            other => other.to_bytes(),
        }
    }
}

impl From<&str> for StoreValue {
    fn from(s: &str) -> Self {
        StoreValue::Text(s.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(s: String) -> Self {
        StoreValue::Text(s)
    }
}

impl From<&[u8]> for StoreValue {
    fn from(b: &[u8]) -> Self {
        StoreValue::Bytes(Bytes::copy_from_slice(b))
    }
}

impl<const N: usize> From<&[u8; N]> for StoreValue {
    fn from(b: &[u8; N]) -> Self {
        StoreValue::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for StoreValue {
    fn from(b: Vec<u8>) -> Self {
        StoreValue::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for StoreValue {
    fn from(b: Bytes) -> Self {
        StoreValue::Bytes(b)
    }
}

impl From<i64> for StoreValue {
    fn from(i: i64) -> Self {
        StoreValue::Integer(i)
    }
}

impl From<i32> for StoreValue {
    fn from(i: i32) -> Self {
        StoreValue::Integer(i64::from(i))
    }
}

impl From<u32> for StoreValue {
    fn from(i: u32) -> Self {
        StoreValue::Integer(i64::from(i))
    }
}

impl From<f64> for StoreValue {
    fn from(f: f64) -> Self {
        StoreValue::Float(f)
    }
}

impl From<f32> for StoreValue {
    fn from(f: f32) -> Self {
        StoreValue::Float(f64::from(f))
    }
}
