//! The numeric value carried through a classification request.
//!
//! Query strings arrive as text. [`Number::parse`] turns that text into either
//! an integer or a decimal, folding whole decimals (`"10.0"`, `"1e3"`) into
//! integers on the way. Everything downstream classifies the *subject*: the
//! integer part of the value, truncated toward zero.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A validated numeric input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Decimal(f64),
}

/// Why a raw value could not become a [`Number`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseNumberError {
    #[error("not a number")]
    Malformed,
    #[error("outside the 64-bit integer range")]
    OutOfRange,
}

// i64::MAX is not representable as f64; 2^63 is the first value past it.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;

impl Number {
    /// Parses and normalizes a raw query value.
    ///
    /// ```
    /// use numclass::Number;
    ///
    /// assert_eq!(Number::parse("153"), Ok(Number::Integer(153)));
    /// assert_eq!(Number::parse("10.0"), Ok(Number::Integer(10)));
    /// assert_eq!(Number::parse("2.5"), Ok(Number::Decimal(2.5)));
    /// assert!(Number::parse("abc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseNumberError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseNumberError::Malformed);
        }
        if let Ok(n) = raw.parse::<i64>() {
            return Ok(Self::Integer(n));
        }
        if let Some(n) = whole_decimal(raw) {
            return Ok(Self::Integer(n));
        }

        let value: f64 = raw.parse().map_err(|_| ParseNumberError::Malformed)?;
        if !value.is_finite() {
            return Err(ParseNumberError::Malformed);
        }
        if !(I64_LOWER..I64_UPPER).contains(&value.trunc()) {
            return Err(ParseNumberError::OutOfRange);
        }

        if value.fract() == 0.0 {
            // Range checked above, the cast is exact.
            Ok(Self::Integer(value as i64))
        } else {
            Ok(Self::Decimal(value))
        }
    }

    /// The integer part, truncated toward zero.
    pub fn subject(self) -> i64 {
        match self {
            Self::Integer(n) => n,
            Self::Decimal(f) => f.trunc() as i64,
        }
    }

    /// Strictly below zero. `-0.0` never reaches here as a decimal: it is whole.
    pub fn is_negative(self) -> bool {
        match self {
            Self::Integer(n) => n < 0,
            Self::Decimal(f) => f < 0.0,
        }
    }
}

/// `"123.000"` or `"123."` as an exact `i64`, without going through `f64`,
/// which cannot hold every integer near the ends of the range.
fn whole_decimal(raw: &str) -> Option<i64> {
    let (int, frac) = raw.split_once('.')?;
    if !frac.bytes().all(|b| b == b'0') {
        return None;
    }
    int.parse().ok()
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(x) => write!(f, "{x}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Integer(n) => serializer.serialize_i64(n),
            Self::Decimal(x) => serializer.serialize_f64(x),
        }
    }
}
