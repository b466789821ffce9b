// Copyright 2025 Cowboy AI, LLC.

//! Nominal types: classification only

use crate::ast::Ast;
use crate::errors::{Failure, TypeError};
use crate::predicates::{evaluate, Predicate};
use crate::primitive::Primitive;

use super::{Attempt, Check, Input};

/// Accepts values of one primitive kind and passes them through unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nominal {
    primitive: Primitive,
}

impl Nominal {
    /// Create a nominal type
    pub fn new(primitive: Primitive) -> Self {
        Self { primitive }
    }

    /// The kind checked
    pub fn primitive(&self) -> Primitive {
        self.primitive
    }
}

impl Check for Nominal {
    fn attempt(&self, input: Input) -> Attempt {
        let Some(value) = input else {
            return Ok(None);
        };
        match evaluate(&value, &[Predicate::Type(self.primitive)]) {
            Ok(()) => Ok(Some(value)),
            Err(violation) => Err(Failure::new(
                value.clone(),
                TypeError::Constraint {
                    input: value,
                    violation,
                },
            )),
        }
    }

    fn ast(&self, _meta: bool) -> Ast {
        Ast::Nominal {
            primitive: self.primitive,
        }
    }
}
