// Copyright 2025 Cowboy AI, LLC.

//! Primitive kinds a raw value can be classified as

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Classification a raw value must satisfy.
///
/// JSON has no native date or time values, so `Date`, `DateTime` and `Time`
/// classify strings in ISO-8601 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// Any value at all
    Any,
    /// JSON `null`
    Nil,
    /// `true` or `false`
    Bool,
    /// Number without a fractional part
    Integer,
    /// Any number
    Float,
    /// String
    String,
    /// `YYYY-MM-DD` string
    Date,
    /// RFC 3339 timestamp string
    DateTime,
    /// `HH:MM:SS` string
    Time,
    /// JSON array
    Array,
    /// JSON object
    Hash,
}

impl Primitive {
    /// Check whether a value belongs to this kind
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Primitive::Any => true,
            Primitive::Nil => value.is_null(),
            Primitive::Bool => value.is_boolean(),
            Primitive::Integer => value.is_i64() || value.is_u64(),
            Primitive::Float => value.is_number(),
            Primitive::String => value.is_string(),
            Primitive::Date => value
                .as_str()
                .is_some_and(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
            Primitive::DateTime => value
                .as_str()
                .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
            Primitive::Time => value
                .as_str()
                .is_some_and(|s| NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok()),
            Primitive::Array => value.is_array(),
            Primitive::Hash => value.is_object(),
        }
    }

    /// Lowercase name used in ASTs and predicate arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Any => "any",
            Primitive::Nil => "nil",
            Primitive::Bool => "bool",
            Primitive::Integer => "integer",
            Primitive::Float => "float",
            Primitive::String => "string",
            Primitive::Date => "date",
            Primitive::DateTime => "date_time",
            Primitive::Time => "time",
            Primitive::Array => "array",
            Primitive::Hash => "hash",
        }
    }

    /// Name prefixed with an indefinite article, for messages
    pub fn with_article(&self) -> String {
        match self {
            Primitive::Any | Primitive::Array | Primitive::Integer => format!("an {}", self.as_str()),
            _ => format!("a {}", self.as_str()),
        }
    }

    /// Every kind, in declaration order
    pub fn all() -> &'static [Primitive] {
        &[
            Primitive::Any,
            Primitive::Nil,
            Primitive::Bool,
            Primitive::Integer,
            Primitive::Float,
            Primitive::String,
            Primitive::Date,
            Primitive::DateTime,
            Primitive::Time,
            Primitive::Array,
            Primitive::Hash,
        ]
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name that matches no primitive kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown primitive kind: '{0}'")]
pub struct UnknownPrimitive(pub String);

impl FromStr for Primitive {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        Primitive::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| UnknownPrimitive(s.to_string()))
    }
}
