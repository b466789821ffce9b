// Copyright 2025 Cowboy AI, LLC.

//! Default values for undefined input

use serde_json::Value;

use crate::ast::Ast;

use super::{Attempt, Check, Decorator, Input, Type, TypeKind};

/// Substitutes a fixed value when the input is undefined or the wrapped type
/// produces no value
#[derive(Debug, Clone, PartialEq)]
pub struct Defaulted {
    wrapped: Type,
    value: Value,
}

impl Defaulted {
    /// Wrap a type with a default. Callers validate `value` first.
    pub(crate) fn new(wrapped: Type, value: Value) -> Self {
        Self { wrapped, value }
    }

    /// The default value
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Decorator for Defaulted {
    fn wrapped(&self) -> &Type {
        &self.wrapped
    }

    fn rewrap(&self, inner: Type) -> TypeKind {
        TypeKind::Default(Self::new(inner, self.value.clone()))
    }
}

impl Check for Defaulted {
    fn attempt(&self, input: Input) -> Attempt {
        if input.is_none() {
            return Ok(Some(self.value.clone()));
        }
        Ok(Some(
            self.wrapped
                .try_input(input)?
                .unwrap_or_else(|| self.value.clone()),
        ))
    }

    fn ast(&self, meta: bool) -> Ast {
        Ast::Default {
            wrapped: Box::new(self.wrapped.build_ast(meta)),
            value: self.value.clone(),
        }
    }
}
