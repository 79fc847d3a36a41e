//! Raw string → typed primitive conversion.
//!
//! Numeric parsing is strict: base-10 only, no whitespace trimming, no locale
//! handling, no digit separators. Whatever `str::parse` rejects for the target
//! width is an error. Floats must also be finite: `inf`, `NaN` and values
//! that overflow the declared precision (`1e39` for `f32`) are rejected.
//!
//! Boolean parsing is total. `"true"`, `"1"` and `"yes"` (any case) are
//! `true`; every other string, including `"false"`, `"0"`, `"no"` and typos,
//! is `false`. This is a permissive policy, not validation: a misspelled
//! `"ture"` quietly reads as `false`.

use thiserror::Error;

use crate::types::{FloatPrecision, IntWidth, Primitive};
use crate::value::Value;

const TRUTHY: [&str; 3] = ["true", "1", "yes"];

/// A raw string that does not parse as the target primitive.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("'{raw}' is not a valid {expected}")]
pub struct CoerceError {
    pub expected: Primitive,
    pub raw: String,
}

/// Convert `raw` into a value of type `target`.
pub fn coerce(raw: &str, target: Primitive) -> Result<Value, CoerceError> {
    let fail = || CoerceError {
        expected: target,
        raw: raw.to_string(),
    };

    match target {
        Primitive::String => Ok(Value::String(raw.to_string())),
        Primitive::Bool => Ok(Value::Bool(parse_bool(raw))),
        Primitive::SignedInt(width) => parse_signed(raw, width).map(Value::Int).ok_or_else(fail),
        Primitive::UnsignedInt(width) => {
            parse_unsigned(raw, width).map(Value::UInt).ok_or_else(fail)
        }
        Primitive::Float(precision) => parse_float(raw, precision)
            .map(Value::Float)
            .ok_or_else(fail),
    }
}

fn parse_bool(raw: &str) -> bool {
    TRUTHY.iter().any(|t| raw.eq_ignore_ascii_case(t))
}

fn parse_signed(raw: &str, width: IntWidth) -> Option<i64> {
    match width {
        IntWidth::W8 => raw.parse::<i8>().ok().map(i64::from),
        IntWidth::W16 => raw.parse::<i16>().ok().map(i64::from),
        IntWidth::W32 => raw.parse::<i32>().ok().map(i64::from),
        IntWidth::W64 => raw.parse::<i64>().ok(),
    }
}

fn parse_unsigned(raw: &str, width: IntWidth) -> Option<u64> {
    // `u64::from_str` accepts a leading '+'; a sign of any kind is not an
    // unsigned literal.
    if raw.starts_with(['+', '-']) {
        return None;
    }
    match width {
        IntWidth::W8 => raw.parse::<u8>().ok().map(u64::from),
        IntWidth::W16 => raw.parse::<u16>().ok().map(u64::from),
        IntWidth::W32 => raw.parse::<u32>().ok().map(u64::from),
        IntWidth::W64 => raw.parse::<u64>().ok(),
    }
}

fn parse_float(raw: &str, precision: FloatPrecision) -> Option<f64> {
    let parsed = match precision {
        FloatPrecision::F32 => raw.parse::<f32>().ok().map(f64::from),
        FloatPrecision::F64 => raw.parse::<f64>().ok(),
    };
    parsed.filter(|f| f.is_finite())
}
