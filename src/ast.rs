// Copyright 2025 Cowboy AI, LLC.

//! Serializable description of how a type was composed
//!
//! The tree preserves declaration order everywhere (schema keys, enum
//! mapping, transform steps, predicates), so two types with equal ASTs
//! were built the same way.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::primitive::Primitive;
use crate::types::UnknownKeys;

/// One predicate of a constrained node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredicateAst {
    /// Predicate name
    pub predicate: String,
    /// Configured arguments
    pub args: Vec<Value>,
}

/// One key of a schema node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyAst {
    /// Key name
    pub name: String,
    /// Whether the key must be present
    pub required: bool,
    /// Type of the value under the key
    #[serde(rename = "type")]
    pub type_ast: Ast,
}

/// Composition tree of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Ast {
    /// Primitive classification
    Nominal {
        /// Kind checked
        primitive: Primitive,
    },
    /// Rule over a wrapped type
    Constrained {
        /// Type checked first
        wrapped: Box<Ast>,
        /// Predicates in evaluation order
        rule: Vec<PredicateAst>,
    },
    /// Transforms applied before a wrapped type
    Constructor {
        /// Type receiving the transformed value
        wrapped: Box<Ast>,
        /// Transform names in application order
        steps: Vec<String>,
    },
    /// Default substituted for undefined input
    Default {
        /// Type of the defaulted value
        wrapped: Box<Ast>,
        /// The default
        value: Value,
    },
    /// Never-failing variant of a type
    Lax {
        /// Type with constraints stripped
        wrapped: Box<Ast>,
    },
    /// Ordered alternative
    Sum {
        /// Tried first
        left: Box<Ast>,
        /// Tried when the left branch fails
        right: Box<Ast>,
    },
    /// Label to value mapping over a wrapped type
    Enum {
        /// Type receiving the translated label
        wrapped: Box<Ast>,
        /// Label and raw value pairs in declaration order
        mapping: Vec<(Value, Value)>,
    },
    /// Homogeneous array
    Array {
        /// Element type
        member: Box<Ast>,
    },
    /// Object with declared keys
    Schema {
        /// Keys in declaration order
        keys: Vec<KeyAst>,
        /// Policy for undeclared keys
        unknown_keys: UnknownKeys,
    },
    /// Object with uniform keys and values
    Map {
        /// Key type
        key: Box<Ast>,
        /// Value type
        value: Box<Ast>,
    },
    /// Node carrying metadata
    Annotated {
        /// Annotated node
        node: Box<Ast>,
        /// Metadata in insertion order
        meta: IndexMap<String, Value>,
    },
}

impl Ast {
    /// Node tag, as used in the serialized form
    pub fn tag(&self) -> &'static str {
        match self {
            Ast::Nominal { .. } => "nominal",
            Ast::Constrained { .. } => "constrained",
            Ast::Constructor { .. } => "constructor",
            Ast::Default { .. } => "default",
            Ast::Lax { .. } => "lax",
            Ast::Sum { .. } => "sum",
            Ast::Enum { .. } => "enum",
            Ast::Array { .. } => "array",
            Ast::Schema { .. } => "schema",
            Ast::Map { .. } => "map",
            Ast::Annotated { .. } => "annotated",
        }
    }

    /// Direct child nodes, in order
    pub fn children(&self) -> Vec<&Ast> {
        match self {
            Ast::Nominal { .. } => Vec::new(),
            Ast::Constrained { wrapped, .. }
            | Ast::Constructor { wrapped, .. }
            | Ast::Default { wrapped, .. }
            | Ast::Lax { wrapped }
            | Ast::Enum { wrapped, .. } => vec![wrapped.as_ref()],
            Ast::Sum { left, right } => vec![left.as_ref(), right.as_ref()],
            Ast::Array { member } => vec![member.as_ref()],
            Ast::Schema { keys, .. } => keys.iter().map(|k| &k.type_ast).collect(),
            Ast::Map { key, value } => vec![key.as_ref(), value.as_ref()],
            Ast::Annotated { node, .. } => vec![node.as_ref()],
        }
    }

    /// Tags from this node down the first-child chain
    pub fn spine(&self) -> Vec<&'static str> {
        let mut tags = vec![self.tag()];
        let mut node = self;
        while let Some(child) = node.children().first().copied() {
            tags.push(child.tag());
            node = child;
        }
        tags
    }
}
