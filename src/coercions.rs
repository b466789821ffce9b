// Copyright 2025 Cowboy AI, LLC.

//! Stock transforms for constructor types
//!
//! The plain family (`to_*`) converts loosely typed values such as strings
//! read from a file. The `params_*` family additionally treats an empty
//! string the way an empty form field is meant: as `null` for scalars and as
//! an empty container for arrays and hashes.
//!
//! Date, time and timestamp outputs are normalized ISO-8601 strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

use crate::types::{Transform, TransformResult};

const TRUE_STRINGS: &[&str] = &["1", "on", "t", "true", "y", "yes"];
const FALSE_STRINGS: &[&str] = &["0", "off", "f", "false", "n", "no"];

fn unsupported(value: &Value, target: &str) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    format!("cannot convert {kind} to {target}")
}

fn is_empty_string(value: &Value) -> bool {
    value.as_str().is_some_and(str::is_empty)
}

// ----------------------------------------------------------------------
// Scalars
// ----------------------------------------------------------------------

fn string(value: Value) -> TransformResult {
    match value {
        Value::String(_) => Ok(Some(value)),
        Value::Null => Ok(Some(Value::String(String::new()))),
        Value::Bool(b) => Ok(Some(Value::String(b.to_string()))),
        Value::Number(n) => Ok(Some(Value::String(n.to_string()))),
        other => Err(unsupported(&other, "a string")),
    }
}

fn integer(value: Value) -> TransformResult {
    match &value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Some(value)),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Ok(Some(Value::from(f as i64)))
            }
            _ => Err(format!("{n} has a fractional part")),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|i| Some(Value::from(i)))
            .map_err(|e| e.to_string()),
        other => Err(unsupported(other, "an integer")),
    }
}

fn float(value: Value) -> TransformResult {
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.trim().parse::<f64>().map_err(|e| e.to_string())?),
        other => return Err(unsupported(other, "a float")),
    };
    parsed
        .and_then(Number::from_f64)
        .map(|n| Some(Value::Number(n)))
        .ok_or_else(|| format!("{value} is not a finite number"))
}

fn boolean(value: Value) -> TransformResult {
    match &value {
        Value::Bool(_) => Ok(Some(value)),
        Value::Number(n) if n.as_i64() == Some(1) => Ok(Some(Value::Bool(true))),
        Value::Number(n) if n.as_i64() == Some(0) => Ok(Some(Value::Bool(false))),
        Value::String(s) => {
            let lowered = s.trim().to_lowercase();
            if TRUE_STRINGS.contains(&lowered.as_str()) {
                Ok(Some(Value::Bool(true)))
            } else if FALSE_STRINGS.contains(&lowered.as_str()) {
                Ok(Some(Value::Bool(false)))
            } else {
                Err(format!("{s:?} is not a recognized boolean"))
            }
        }
        other => Err(unsupported(other, "a boolean")),
    }
}

fn date(value: Value) -> TransformResult {
    let Value::String(s) = &value else {
        return Err(unsupported(&value, "a date"));
    };
    let s = s.trim();
    let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|e| e.to_string())?;
    Ok(Some(Value::String(parsed.format("%Y-%m-%d").to_string())))
}

fn date_time(value: Value) -> TransformResult {
    let parsed: DateTime<Utc> = match &value {
        Value::Number(n) => {
            let seconds = n
                .as_i64()
                .ok_or_else(|| format!("{n} is not a whole number of seconds"))?;
            DateTime::from_timestamp(seconds, 0)
                .ok_or_else(|| format!("{seconds} is out of range"))?
        }
        Value::String(s) => {
            let s = s.trim();
            match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => dt.with_timezone(&Utc),
                Err(_) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                    .map_err(|e| e.to_string())?
                    .and_utc(),
            }
        }
        other => return Err(unsupported(other, "a timestamp")),
    };
    Ok(Some(Value::String(
        parsed.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    )))
}

fn time(value: Value) -> TransformResult {
    let Value::String(s) = &value else {
        return Err(unsupported(&value, "a time"));
    };
    let s = s.trim();
    let parsed = NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S%.f"))
        .map_err(|e| e.to_string())?;
    Ok(Some(Value::String(parsed.format("%H:%M:%S").to_string())))
}

// ----------------------------------------------------------------------
// Containers
// ----------------------------------------------------------------------

fn array(value: Value) -> TransformResult {
    Ok(Some(match value {
        Value::Null => Value::Array(Vec::new()),
        Value::Array(_) => value,
        other => Value::Array(vec![other]),
    }))
}

fn hash(value: Value) -> TransformResult {
    match value {
        Value::Null => Ok(Some(Value::Object(Map::new()))),
        Value::Object(_) => Ok(Some(value)),
        other => Err(unsupported(&other, "a hash")),
    }
}

/// Convert numbers, booleans and `null` to strings
pub fn to_string() -> Transform {
    Transform::new("coercible.string", string)
}

/// Convert numeric strings and whole floats to integers
pub fn to_integer() -> Transform {
    Transform::new("coercible.integer", integer)
}

/// Convert numeric strings and integers to floats
pub fn to_float() -> Transform {
    Transform::new("coercible.float", float)
}

/// Convert `"true"`/`"false"`-like strings and `0`/`1` to booleans
pub fn to_bool() -> Transform {
    Transform::new("coercible.bool", boolean)
}

/// Turn an empty string into `null`; other values pass through
pub fn to_nil() -> Transform {
    Transform::map("coercible.nil", |v| {
        if is_empty_string(&v) {
            Value::Null
        } else {
            v
        }
    })
}

/// Wrap a scalar in a one-element array; `null` becomes `[]`
pub fn to_array() -> Transform {
    Transform::new("coercible.array", array)
}

/// Turn `null` into `{}`; objects pass through
pub fn to_hash() -> Transform {
    Transform::new("coercible.hash", hash)
}

/// Normalize a date or timestamp string to `YYYY-MM-DD`
pub fn to_date() -> Transform {
    Transform::new("coercible.date", date)
}

/// Normalize a timestamp string or Unix seconds to RFC 3339 in UTC
pub fn to_date_time() -> Transform {
    Transform::new("coercible.date_time", date_time)
}

/// Normalize a time of day to `HH:MM:SS`
pub fn to_time() -> Transform {
    Transform::new("coercible.time", time)
}

/// Drop empty strings, so container members disappear instead of failing
pub fn empty_to_undefined() -> Transform {
    Transform::new("empty_to_undefined", |v| {
        if is_empty_string(&v) {
            Ok(None)
        } else {
            Ok(Some(v))
        }
    })
}

fn params<F>(name: &str, empty: fn() -> Value, convert: F) -> Transform
where
    F: Fn(Value) -> TransformResult + Send + Sync + 'static,
{
    Transform::new(format!("params.{name}"), move |v| {
        if is_empty_string(&v) {
            Ok(Some(empty()))
        } else {
            convert(v)
        }
    })
}

/// [`to_nil`] for form input
pub fn params_nil() -> Transform {
    params("nil", || Value::Null, |v| Ok(Some(v)))
}

/// [`to_integer`], with `""` as `null`
pub fn params_integer() -> Transform {
    params("integer", || Value::Null, integer)
}

/// [`to_float`], with `""` as `null`
pub fn params_float() -> Transform {
    params("float", || Value::Null, float)
}

/// [`to_bool`], with `""` as `null`
pub fn params_bool() -> Transform {
    params("bool", || Value::Null, boolean)
}

/// [`to_date`], with `""` as `null`
pub fn params_date() -> Transform {
    params("date", || Value::Null, date)
}

/// [`to_date_time`], with `""` as `null`
pub fn params_date_time() -> Transform {
    params("date_time", || Value::Null, date_time)
}

/// [`to_time`], with `""` as `null`
pub fn params_time() -> Transform {
    params("time", || Value::Null, time)
}

/// [`to_array`], with `""` as `[]`
pub fn params_array() -> Transform {
    params("array", || Value::Array(Vec::new()), array)
}

/// [`to_hash`], with `""` as `{}`
pub fn params_hash() -> Transform {
    params("hash", || Value::Object(Map::new()), hash)
}
