// Copyright 2025 Cowboy AI, LLC.

//! Lax types

use crate::ast::Ast;

use super::{Attempt, Check, Decorator, Input, Type, TypeKind};

/// Never fails: on failure of the wrapped type it yields the input as far as
/// it was coerced.
///
/// Built by [`Type::lax`], which also strips every constraint from the
/// wrapped type, leaving transforms and nominal checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Lax {
    wrapped: Type,
}

impl Lax {
    pub(crate) fn new(wrapped: Type) -> Self {
        Self { wrapped }
    }
}

impl Decorator for Lax {
    fn wrapped(&self) -> &Type {
        &self.wrapped
    }

    fn rewrap(&self, inner: Type) -> TypeKind {
        TypeKind::Lax(Self::new(inner))
    }
}

impl Check for Lax {
    fn attempt(&self, input: Input) -> Attempt {
        Ok(self
            .wrapped
            .try_input(input)
            .unwrap_or_else(|failure| Some(failure.input)))
    }

    fn ast(&self, meta: bool) -> Ast {
        Ast::Lax {
            wrapped: Box::new(self.wrapped.build_ast(meta)),
        }
    }
}
