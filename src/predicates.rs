// Copyright 2025 Cowboy AI, LLC.

//! Constraint evaluation
//!
//! A [`Rule`] is an ordered list of named [`Predicate`]s. Evaluation stops at
//! the first predicate that fails and reports it as a [`Violation`] carrying
//! the predicate name, its arguments and the offending value.
//!
//! Predicates never panic on values of the wrong shape; `gt?` applied to a
//! string simply fails.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Number, Value};
use uuid::{Uuid, Variant};

use crate::errors::{DefinitionError, DefinitionResult};
use crate::primitive::Primitive;

/// Signature of a custom predicate check
pub type PredicateFn = dyn Fn(&Value) -> bool + Send + Sync;

/// A named check on a single value
#[derive(Clone)]
pub enum Predicate {
    /// Value is of the given primitive kind
    Type(Primitive),
    /// Value equals the argument
    Eql(Value),
    /// Value is the argument (identity; equality for JSON values)
    Is(Value),
    /// Number greater than the argument
    Gt(Number),
    /// Number greater than or equal to the argument
    Gteq(Number),
    /// Number less than the argument
    Lt(Number),
    /// Number less than or equal to the argument
    Lteq(Number),
    /// String, array or object of exactly this size
    Size(usize),
    /// Size at least this
    MinSize(usize),
    /// Size at most this
    MaxSize(usize),
    /// Not null and not empty
    Filled,
    /// Null or empty
    Empty,
    /// String matching the pattern
    Format(Regex),
    /// Value is one of the listed values
    IncludedIn(Vec<Value>),
    /// Value is none of the listed values
    ExcludedFrom(Vec<Value>),
    /// Array element, substring or object key is present
    Includes(Value),
    /// Array element, substring or object key is absent
    Excludes(Value),
    /// Odd integer
    Odd,
    /// Even integer
    Even,
    /// Exactly `true`
    True,
    /// Exactly `false`
    False,
    /// Version 4 UUID string
    UuidV4,
    /// Externally supplied check
    Custom {
        /// Predicate name, compared for equality
        name: String,
        /// Arguments shown in violations
        args: Vec<Value>,
        /// The check itself
        check: Arc<PredicateFn>,
    },
}

impl Predicate {
    /// Build a `format?` predicate from a regular expression
    pub fn format(pattern: &str) -> DefinitionResult<Self> {
        Regex::new(pattern)
            .map(Predicate::Format)
            .map_err(|e| DefinitionError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Build a custom predicate
    pub fn custom<F>(name: impl Into<String>, args: Vec<Value>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Predicate::Custom {
            name: name.into(),
            args,
            check: Arc::new(check),
        }
    }

    /// Predicate name as shown in messages
    pub fn name(&self) -> &str {
        match self {
            Predicate::Type(_) => "type?",
            Predicate::Eql(_) => "eql?",
            Predicate::Is(_) => "is?",
            Predicate::Gt(_) => "gt?",
            Predicate::Gteq(_) => "gteq?",
            Predicate::Lt(_) => "lt?",
            Predicate::Lteq(_) => "lteq?",
            Predicate::Size(_) => "size?",
            Predicate::MinSize(_) => "min_size?",
            Predicate::MaxSize(_) => "max_size?",
            Predicate::Filled => "filled?",
            Predicate::Empty => "empty?",
            Predicate::Format(_) => "format?",
            Predicate::IncludedIn(_) => "included_in?",
            Predicate::ExcludedFrom(_) => "excluded_from?",
            Predicate::Includes(_) => "includes?",
            Predicate::Excludes(_) => "excludes?",
            Predicate::Odd => "odd?",
            Predicate::Even => "even?",
            Predicate::True => "true?",
            Predicate::False => "false?",
            Predicate::UuidV4 => "uuid_v4?",
            Predicate::Custom { name, .. } => name,
        }
    }

    /// Arguments the predicate was configured with
    pub fn args(&self) -> Vec<Value> {
        match self {
            Predicate::Type(primitive) => vec![Value::String(primitive.as_str().to_string())],
            Predicate::Eql(v) | Predicate::Is(v) | Predicate::Includes(v) | Predicate::Excludes(v) => {
                vec![v.clone()]
            }
            Predicate::Gt(n) | Predicate::Gteq(n) | Predicate::Lt(n) | Predicate::Lteq(n) => {
                vec![Value::Number(n.clone())]
            }
            Predicate::Size(n) | Predicate::MinSize(n) | Predicate::MaxSize(n) => {
                vec![Value::from(*n)]
            }
            Predicate::Format(re) => vec![Value::String(re.as_str().to_string())],
            Predicate::IncludedIn(values) | Predicate::ExcludedFrom(values) => {
                vec![Value::Array(values.clone())]
            }
            Predicate::Custom { args, .. } => args.clone(),
            Predicate::Filled
            | Predicate::Empty
            | Predicate::Odd
            | Predicate::Even
            | Predicate::True
            | Predicate::False
            | Predicate::UuidV4 => Vec::new(),
        }
    }

    /// Check a value
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Predicate::Type(primitive) => primitive.matches(value),
            Predicate::Eql(expected) | Predicate::Is(expected) => value == expected,
            Predicate::Gt(bound) => compare(value, bound) == Some(Ordering::Greater),
            Predicate::Gteq(bound) => matches!(
                compare(value, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Predicate::Lt(bound) => compare(value, bound) == Some(Ordering::Less),
            Predicate::Lteq(bound) => matches!(
                compare(value, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Predicate::Size(n) => size_of(value) == Some(*n),
            Predicate::MinSize(n) => size_of(value).is_some_and(|size| size >= *n),
            Predicate::MaxSize(n) => size_of(value).is_some_and(|size| size <= *n),
            Predicate::Filled => !is_empty(value),
            Predicate::Empty => is_empty(value),
            Predicate::Format(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            Predicate::IncludedIn(values) => values.contains(value),
            Predicate::ExcludedFrom(values) => !values.contains(value),
            Predicate::Includes(needle) => includes(value, needle) == Some(true),
            Predicate::Excludes(needle) => includes(value, needle) == Some(false),
            Predicate::Odd => value.as_i64().is_some_and(|n| n % 2 != 0),
            Predicate::Even => value.as_i64().is_some_and(|n| n % 2 == 0),
            Predicate::True => value == &Value::Bool(true),
            Predicate::False => value == &Value::Bool(false),
            Predicate::UuidV4 => value.as_str().is_some_and(is_uuid_v4),
            Predicate::Custom { check, .. } => check(value),
        }
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Predicate::Format(a), Predicate::Format(b)) => a.as_str() == b.as_str(),
            (
                Predicate::Custom { name: a, args: x, .. },
                Predicate::Custom { name: b, args: y, .. },
            ) => a == b && x == y,
            (Predicate::Custom { .. }, _) | (_, Predicate::Custom { .. }) => false,
            (a, b) => a.name() == b.name() && a.args() == b.args(),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, arg) in self.args().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

fn compare(value: &Value, bound: &Number) -> Option<Ordering> {
    let Value::Number(number) = value else {
        return None;
    };
    match (number.as_i64(), bound.as_i64()) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        _ => number.as_f64()?.partial_cmp(&bound.as_f64()?),
    }
}

fn size_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn includes(value: &Value, needle: &Value) -> Option<bool> {
    match value {
        Value::Array(items) => Some(items.contains(needle)),
        Value::String(s) => needle.as_str().map(|n| s.contains(n)),
        Value::Object(map) => needle.as_str().map(|k| map.contains_key(k)),
        _ => None,
    }
}

// hyphenated form only; braced, URN and simple forms are rejected
fn is_uuid_v4(s: &str) -> bool {
    s.len() == 36
        && Uuid::try_parse(s)
            .is_ok_and(|id| id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122)
}

/// The first failing predicate of a rule
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Name of the failing predicate
    pub predicate: String,
    /// Arguments it was configured with
    pub args: Vec<Value>,
    /// Value it was evaluated on
    pub input: Value,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for arg in &self.args {
            write!(f, "{arg}, ")?;
        }
        write!(f, "{}) failed", self.input)
    }
}

/// Ordered conjunction of predicates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rule {
    predicates: Vec<Predicate>,
}

impl Rule {
    /// Create a rule from predicates, kept in the given order
    pub fn new(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Append more predicates, evaluated after the existing ones
    pub fn and(&self, more: impl IntoIterator<Item = Predicate>) -> Self {
        let mut predicates = self.predicates.clone();
        predicates.extend(more);
        Self { predicates }
    }

    /// Predicates in evaluation order
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Check a value, stopping at the first failing predicate
    pub fn evaluate(&self, value: &Value) -> Result<(), Violation> {
        evaluate(value, &self.predicates)
    }
}

/// Evaluate predicates in order against a value
pub fn evaluate(value: &Value, predicates: &[Predicate]) -> Result<(), Violation> {
    match predicates.iter().find(|p| !p.test(value)) {
        Some(failed) => Err(Violation {
            predicate: failed.name().to_string(),
            args: failed.args(),
            input: value.clone(),
        }),
        None => Ok(()),
    }
}
