//! Post-retrieval conversions
//!
//! A `Transform` turns the raw bytes read from the store into the type the
//! caller asked for. Built-in strategies cover the storable kinds; any
//! `Fn(Bytes) -> Result<T, E>` closure works as a custom one.

use crate::error::TransformError;
use bytes::Bytes;

/// Converts raw stored bytes into a semantic type
pub trait Transform {
    type Output;

    fn apply(&self, raw: Bytes) -> Result<Self::Output, TransformError>;
}

/// Identity: hand back the stored bytes unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Raw;

/// Strict UTF-8 decode
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

/// Decimal integer parse (`i64`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseInt;

/// Floating-point parse (`f64`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseFloat;

impl Transform for Raw {
    type Output = Bytes;

    fn apply(&self, raw: Bytes) -> Result<Bytes, TransformError> {
        Ok(raw)
    }
}

impl Transform for Utf8 {
    type Output = String;

    fn apply(&self, raw: Bytes) -> Result<String, TransformError> {
        Ok(String::from_utf8(raw.to_vec())?)
    }
}

impl Transform for ParseInt {
    type Output = i64;

    fn apply(&self, raw: Bytes) -> Result<i64, TransformError> {
        let text = std::str::from_utf8(&raw)?;
        text.trim()
            .parse::<i64>()
            .map_err(|_| TransformError::InvalidInteger(text.to_string()))
    }
}

impl Transform for ParseFloat {
    type Output = f64;

    fn apply(&self, raw: Bytes) -> Result<f64, TransformError> {
        let text = std::str::from_utf8(&raw)?;
        text.trim()
            .parse::<f64>()
            .map_err(|_| TransformError::InvalidFloat(text.to_string()))
    }
}

impl<F, T, E> Transform for F
where
    F: Fn(Bytes) -> Result<T, E>,
    E: Into<TransformError>,
{
    type Output = T;

    fn apply(&self, raw: Bytes) -> Result<T, TransformError> {
        self(raw).map_err(Into::into)
    }
}
