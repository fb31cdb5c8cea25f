//! Type coercion from raw strings and JSON values.
//!
//! Coercion is lax in the same places a typical schema layer is: integers
//! may arrive as numeric strings, floats as integers or strings, booleans as
//! `yes`/`no`/`on`/`off` and friends. Strings are strict in JSON bodies.

use std::num::IntErrorKind;

use serde_json::Value;

use super::decoder::Decoder;

/// Why a raw value could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    pub kind: &'static str,
    pub msg: String,
}

impl Invalid {
    pub fn new(kind: &'static str, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    fn int_parsing() -> Self {
        Self::new(
            "int_parsing",
            "Input should be a valid integer, unable to parse string as an integer",
        )
    }

    fn int_parsing_size() -> Self {
        Self::new(
            "int_parsing_size",
            "Unable to parse input as an integer, exceeded maximum size",
        )
    }

    fn float_parsing() -> Self {
        Self::new(
            "float_parsing",
            "Input should be a valid number, unable to parse string as a number",
        )
    }
}

// =============================================================================
// Path and Query Values
// =============================================================================

/// A type that can be read from a single path segment or query value.
pub trait FromParam: Sized {
    fn from_param(raw: &str) -> Result<Self, Invalid>;
}

impl FromParam for String {
    fn from_param(raw: &str) -> Result<Self, Invalid> {
        Ok(raw.to_string())
    }
}

impl FromParam for i64 {
    fn from_param(raw: &str) -> Result<Self, Invalid> {
        parse_int(raw)
    }
}

impl FromParam for bool {
    fn from_param(raw: &str) -> Result<Self, Invalid> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
            _ => Err(Invalid::new(
                "bool_parsing",
                "Input should be a valid boolean, unable to interpret input",
            )),
        }
    }
}

/// Parse a decimal integer, tolerating surrounding whitespace and an
/// all-zero fractional part (`"42.0"`).
fn parse_int(raw: &str) -> Result<i64, Invalid> {
    let trimmed = raw.trim();
    let digits = match trimmed.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') => {
            whole
        }
        Some(_) => return Err(Invalid::int_parsing()),
        None => trimmed,
    };
    digits.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Invalid::int_parsing_size(),
        _ => Invalid::int_parsing(),
    })
}

/// Parse a finite float. `nan` and `inf` have no JSON form and are refused.
fn parse_float(raw: &str) -> Result<f64, Invalid> {
    match raw.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f),
        _ => Err(Invalid::float_parsing()),
    }
}

// =============================================================================
// JSON Values
// =============================================================================

/// A type that can be decoded from a JSON body value.
///
/// Implementations record their own errors on the decoder under `loc` and
/// return `None` when nothing usable could be produced. Composite types
/// return `Some` whenever the value had the right shape, even if some of
/// their fields failed; the decoder still holds those failures.
pub trait FromJson: Sized {
    fn from_json(value: &Value, loc: &[String], decoder: &mut Decoder) -> Option<Self>;
}

impl FromJson for String {
    fn from_json(value: &Value, loc: &[String], decoder: &mut Decoder) -> Option<Self> {
        let result = match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(Invalid::new("string_type", "Input should be a valid string")),
        };
        decoder.coerce(loc, value, result)
    }
}

impl FromJson for i64 {
    fn from_json(value: &Value, loc: &[String], decoder: &mut Decoder) -> Option<Self> {
        decoder.coerce(loc, value, json_int(value))
    }
}

impl FromJson for f64 {
    fn from_json(value: &Value, loc: &[String], decoder: &mut Decoder) -> Option<Self> {
        decoder.coerce(loc, value, json_float(value))
    }
}

fn json_int(value: &Value) -> Result<i64, Invalid> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() != 0.0 => Err(Invalid::new(
                    "int_from_float",
                    "Input should be a valid integer, got a number with a fractional part",
                )),
                Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
                _ => Err(Invalid::int_parsing_size()),
            }
        }
        Value::String(s) => parse_int(s),
        Value::Bool(b) => Ok(i64::from(*b)),
        _ => Err(Invalid::new("int_type", "Input should be a valid integer")),
    }
}

fn json_float(value: &Value) -> Result<f64, Invalid> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Invalid::new("float_type", "Input should be a valid number")),
        Value::String(s) => parse_float(s),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        _ => Err(Invalid::new("float_type", "Input should be a valid number")),
    }
}
