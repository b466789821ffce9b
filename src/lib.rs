// Copyright 2025 Cowboy AI, LLC.

//! # CIM Types
//!
//! Composable runtime type checking and coercion for loosely typed data.
//!
//! A [`Type`] describes how a [`serde_json::Value`] of unknown shape is
//! validated and normalized before it reaches strongly typed code:
//! - **Nominal**: classification by primitive kind
//! - **Constrained**: named predicates over a wrapped type
//! - **Constructor**: transforms applied ahead of a wrapped type
//! - **Sum**: ordered alternatives, first match wins
//! - **Enum**: a bijective label to raw value mapping
//! - **Aggregates**: arrays, hash schemas and maps that report every
//!   member failure, not just the first
//!
//! ## Design Principles
//!
//! 1. **Immutability**: descriptors are shared through `Arc` and never change
//! 2. **One acceptance rule**: `call_unsafe`, `call_safe` and `try_call` are
//!    views of the same check
//! 3. **Attributable failures**: every error names the predicate, index or
//!    key it came from
//!
//! ```
//! use cim_types::{standard::coercible, Predicate};
//! use serde_json::json;
//!
//! let port = coercible::integer()
//!     .constrained([Predicate::Gt(0.into()), Predicate::Lteq(65535.into())])
//!     .unwrap();
//! assert_eq!(port.call_unsafe(json!("8080")), Ok(json!(8080)));
//! assert_eq!(
//!     port.call_unsafe(json!("0")).unwrap_err().to_string(),
//!     "0 violates constraints (gt?(0, 0) failed)"
//! );
//! ```

#![warn(missing_docs)]

mod errors;
mod maybe;
mod predicates;
mod primitive;

pub mod ast;
pub mod builder;
pub mod coercions;
pub mod standard;
pub mod types;

pub use ast::{Ast, KeyAst, PredicateAst};
pub use errors::{
    DefinitionError, DefinitionResult, Failure, MemberFailure, Segment, TypeError, TypeResult,
};
pub use maybe::Maybe;
pub use predicates::{evaluate, Predicate, PredicateFn, Rule, Violation};
pub use primitive::{Primitive, UnknownPrimitive};
pub use types::{
    ArrayOf, Attempt, Constrained, Constructor, Decorator, Defaulted, Enum, Input, Lax, MapOf,
    Meta, Nominal, Schema, SchemaKey, SchemaOptions, Sum, Transform, TransformFn,
    TransformResult, Type, TypeKind, UnknownKeys,
};
