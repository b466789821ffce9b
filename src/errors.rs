// Copyright 2025 Cowboy AI, LLC.

//! Error types for type checking and type definition

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::predicates::Violation;
use crate::primitive::Primitive;

/// Position of a member failure inside a container
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Array element index
    Index(usize),
    /// Hash or map key
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(index) => write!(f, "[{index}]"),
            Segment::Key(key) => write!(f, "{key}"),
        }
    }
}

/// A failure attributed to one element or field of a container
#[derive(Debug, Clone, PartialEq)]
pub struct MemberFailure {
    /// Where the failure occurred
    pub at: Segment,
    /// What went wrong there
    pub error: TypeError,
}

impl fmt::Display for MemberFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.at, self.error)
    }
}

fn render_members(failures: &[MemberFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors produced while checking a value against a type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    /// Value failed a named predicate
    #[error("{input} violates constraints ({violation})")]
    Constraint {
        /// Value the rule was evaluated on
        input: Value,
        /// First failing predicate
        violation: Violation,
    },

    /// A constructor transform rejected its input
    #[error("{input} cannot be coerced: {message}")]
    Coercion {
        /// Value handed to the transform
        input: Value,
        /// Reason reported by the transform
        message: String,
    },

    /// A transform produced no value where one was required
    #[error("{input} produced no value")]
    NotApplicable {
        /// Value handed to the transform
        input: Value,
    },

    /// Neither branch of a sum type accepted the value
    #[error("{left}; {right}")]
    Sum {
        /// Failure of the left branch
        left: Box<TypeError>,
        /// Failure of the right branch
        right: Box<TypeError>,
    },

    /// One or more members of a container failed
    #[error("{}", render_members(.failures))]
    Aggregate {
        /// Every member failure, in container order
        failures: Vec<MemberFailure>,
    },

    /// Container type applied to something that is not a container
    #[error("{input} is not {}", .expected.with_article())]
    NotACollection {
        /// Offending value
        input: Value,
        /// Container kind that was expected
        expected: Primitive,
    },

    /// Required schema key is absent
    #[error("{key} is missing")]
    MissingKey {
        /// Name of the missing key
        key: String,
    },

    /// Key not declared by a strict schema
    #[error("{key} is not allowed")]
    UnknownKey {
        /// Name of the unexpected key
        key: String,
    },
}

impl TypeError {
    /// Check if this is a predicate violation
    pub fn is_constraint_error(&self) -> bool {
        matches!(self, TypeError::Constraint { .. })
    }

    /// Check if a transform could not produce a value
    pub fn is_coercion_error(&self) -> bool {
        matches!(
            self,
            TypeError::Coercion { .. } | TypeError::NotApplicable { .. }
        )
    }

    /// Check if this collects member failures
    pub fn is_aggregate(&self) -> bool {
        matches!(self, TypeError::Aggregate { .. })
    }

    /// Member failures of an aggregate error, empty otherwise
    pub fn member_failures(&self) -> &[MemberFailure] {
        match self {
            TypeError::Aggregate { failures } => failures,
            _ => &[],
        }
    }

    /// Number of leaf failures, counting through sums and aggregates
    pub fn failure_count(&self) -> usize {
        match self {
            TypeError::Aggregate { failures } => {
                failures.iter().map(|f| f.error.failure_count()).sum()
            }
            TypeError::Sum { left, right } => left.failure_count() + right.failure_count(),
            _ => 1,
        }
    }
}

/// Failed validation: the error plus the input as far as it was coerced
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct Failure {
    /// Input after whatever coercion succeeded before the failure
    pub input: Value,
    /// The structured reason
    pub error: TypeError,
}

impl Failure {
    /// Create a failure for an input
    pub fn new(input: Value, error: TypeError) -> Self {
        Self { input, error }
    }

    /// Drop the partially coerced input, keeping only the error
    pub fn into_error(self) -> TypeError {
        self.error
    }
}

/// Errors raised while building a type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    /// Two enum labels map to the same raw value
    #[error("enum mapping is not invertible: {value} is mapped by both {first} and {second}")]
    NonBijectiveEnum {
        /// Shared raw value
        value: Value,
        /// First label mapping to it
        first: Value,
        /// Second label mapping to it
        second: Value,
    },

    /// The same enum label was given twice
    #[error("enum label {0} is defined more than once")]
    DuplicateEnumLabel(Value),

    /// `default` called on an enum type
    #[error(".enum(values).default(value) is not supported. Call .default(value).enum(values) instead")]
    DefaultAfterEnum,

    /// Default value rejected by its own type
    #[error("default value {value} violates constraints: {error}")]
    InvalidDefault {
        /// Rejected default
        value: Value,
        /// Why the type rejected it
        error: TypeError,
    },

    /// `format?` predicate given an invalid regular expression
    #[error("invalid pattern {pattern}: {message}")]
    InvalidPattern {
        /// Source of the pattern
        pattern: String,
        /// Compiler message
        message: String,
    },
}

/// Result type for type definitions
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Result of checking a single value
pub type TypeResult = Result<Value, Failure>;
