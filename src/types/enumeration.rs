// Copyright 2025 Cowboy AI, LLC.

//! Enum types
//!
//! An enum maps labels to raw values. The wrapped type only ever sees
//! labels: raw values are translated to their label before delegation, and
//! anything unrecognized is passed through for the wrapped type to reject.

use serde_json::Value;
use tracing::{debug, warn};

use crate::ast::Ast;
use crate::errors::{DefinitionError, DefinitionResult};

use super::{Attempt, Check, Decorator, Input, Type, TypeKind};

/// A type restricted to a bijective label to value mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    wrapped: Type,
    mapping: Vec<(Value, Value)>,
}

impl Enum {
    /// Build an enum over `wrapped`.
    ///
    /// Fails if a label repeats or if two labels share a raw value.
    pub fn new(wrapped: Type, mapping: Vec<(Value, Value)>) -> DefinitionResult<Self> {
        for (i, (label, value)) in mapping.iter().enumerate() {
            let earlier = &mapping[..i];
            if earlier.iter().any(|(l, _)| l == label) {
                warn!("Rejected enum: duplicate label {}", label);
                return Err(DefinitionError::DuplicateEnumLabel(label.clone()));
            }
            if let Some((first, _)) = earlier.iter().find(|(_, v)| v == value) {
                warn!("Rejected enum: {} is mapped twice", value);
                return Err(DefinitionError::NonBijectiveEnum {
                    value: value.clone(),
                    first: first.clone(),
                    second: label.clone(),
                });
            }
        }
        debug!("Built enum with {} labels", mapping.len());
        Ok(Self { wrapped, mapping })
    }

    /// Label and raw value pairs in declaration order
    pub fn mapping(&self) -> &[(Value, Value)] {
        &self.mapping
    }

    /// Labels in declaration order
    pub fn values(&self) -> Vec<&Value> {
        self.mapping.iter().map(|(label, _)| label).collect()
    }

    /// Label for a raw value
    pub fn label_for(&self, raw: &Value) -> Option<&Value> {
        self.mapping
            .iter()
            .find(|(_, value)| value == raw)
            .map(|(label, _)| label)
    }

    /// Translate an input before it reaches the wrapped type
    pub fn map_value(&self, input: Value) -> Value {
        if self.mapping.iter().any(|(label, _)| label == &input) {
            return input;
        }
        self.label_for(&input).cloned().unwrap_or(input)
    }

    /// Whether a value is accepted
    pub fn includes(&self, value: &Value) -> bool {
        self.attempt(Some(value.clone())).is_ok_and(|out| out.is_some())
    }
}

impl Decorator for Enum {
    fn wrapped(&self) -> &Type {
        &self.wrapped
    }

    fn rewrap(&self, inner: Type) -> TypeKind {
        TypeKind::Enum(Self {
            wrapped: inner,
            mapping: self.mapping.clone(),
        })
    }
}

impl Check for Enum {
    fn attempt(&self, input: Input) -> Attempt {
        self.wrapped.try_input(input.map(|v| self.map_value(v)))
    }

    fn ast(&self, meta: bool) -> Ast {
        Ast::Enum {
            wrapped: Box::new(self.wrapped.build_ast(meta)),
            mapping: self.mapping.clone(),
        }
    }
}
