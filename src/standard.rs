// Copyright 2025 Cowboy AI, LLC.

//! Prebuilt types
//!
//! Three families, one function per primitive kind:
//!
//! - [`strict`] accepts only values already of the right kind
//! - [`coercible`] converts loosely typed scalars first
//! - [`params`] is [`coercible`] for form input, where `""` means blank
//!
//! Every call builds a fresh descriptor; keep the result if it is used often.

use crate::coercions;
use crate::primitive::Primitive;
use crate::types::{Transform, Type};

fn coerced(primitive: Primitive, transform: Transform) -> Type {
    Type::nominal(primitive).constructor(transform)
}

/// Types that check without converting
pub mod strict {
    use super::*;

    /// `null`
    pub fn nil() -> Type {
        crate::builder::strict(Primitive::Nil)
    }

    /// `true` or `false`
    pub fn bool() -> Type {
        crate::builder::strict(Primitive::Bool)
    }

    /// Integer
    pub fn integer() -> Type {
        crate::builder::strict(Primitive::Integer)
    }

    /// Any number
    pub fn float() -> Type {
        crate::builder::strict(Primitive::Float)
    }

    /// String
    pub fn string() -> Type {
        crate::builder::strict(Primitive::String)
    }

    /// `YYYY-MM-DD` string
    pub fn date() -> Type {
        crate::builder::strict(Primitive::Date)
    }

    /// RFC 3339 timestamp string
    pub fn date_time() -> Type {
        crate::builder::strict(Primitive::DateTime)
    }

    /// `HH:MM:SS` string
    pub fn time() -> Type {
        crate::builder::strict(Primitive::Time)
    }

    /// Array
    pub fn array() -> Type {
        crate::builder::strict(Primitive::Array)
    }

    /// Object
    pub fn hash() -> Type {
        crate::builder::strict(Primitive::Hash)
    }
}

/// Types that convert loosely typed input before checking it
pub mod coercible {
    use super::*;

    /// Anything rendered as a string
    pub fn string() -> Type {
        coerced(Primitive::String, coercions::to_string())
    }

    /// Integer from numbers and numeric strings
    pub fn integer() -> Type {
        coerced(Primitive::Integer, coercions::to_integer())
    }

    /// Float from numbers and numeric strings
    pub fn float() -> Type {
        coerced(Primitive::Float, coercions::to_float())
    }

    /// Boolean from common spellings
    pub fn bool() -> Type {
        coerced(Primitive::Bool, coercions::to_bool())
    }

    /// `null`, with `""` accepted as `null`
    pub fn nil() -> Type {
        coerced(Primitive::Nil, coercions::to_nil())
    }

    /// Array, wrapping scalars
    pub fn array() -> Type {
        coerced(Primitive::Array, coercions::to_array())
    }

    /// Object, with `null` as `{}`
    pub fn hash() -> Type {
        coerced(Primitive::Hash, coercions::to_hash())
    }

    /// Normalized date
    pub fn date() -> Type {
        coerced(Primitive::Date, coercions::to_date())
    }

    /// Normalized UTC timestamp
    pub fn date_time() -> Type {
        coerced(Primitive::DateTime, coercions::to_date_time())
    }

    /// Normalized time of day
    pub fn time() -> Type {
        coerced(Primitive::Time, coercions::to_time())
    }
}

/// Types for HTML form and query string input.
///
/// Scalars map `""` to `null`, so a blank field fails unless the transform
/// sits in front of an optional type.
pub mod params {
    use super::*;

    /// `null` from `""`
    pub fn nil() -> Type {
        coerced(Primitive::Nil, coercions::params_nil())
    }

    /// Integer from a numeric field
    pub fn integer() -> Type {
        coerced(Primitive::Integer, coercions::params_integer())
    }

    /// Float from a numeric field
    pub fn float() -> Type {
        coerced(Primitive::Float, coercions::params_float())
    }

    /// Boolean from a checkbox-like field
    pub fn bool() -> Type {
        coerced(Primitive::Bool, coercions::params_bool())
    }

    /// Date from a date field
    pub fn date() -> Type {
        coerced(Primitive::Date, coercions::params_date())
    }

    /// Timestamp from a date-time field
    pub fn date_time() -> Type {
        coerced(Primitive::DateTime, coercions::params_date_time())
    }

    /// Time of day from a time field
    pub fn time() -> Type {
        coerced(Primitive::Time, coercions::params_time())
    }

    /// Array, with `""` as `[]`
    pub fn array() -> Type {
        coerced(Primitive::Array, coercions::params_array())
    }

    /// Object, with `""` as `{}`
    pub fn hash() -> Type {
        coerced(Primitive::Hash, coercions::params_hash())
    }
}
