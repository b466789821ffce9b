// Copyright 2025 Cowboy AI, LLC.

//! Sum types

use crate::ast::Ast;
use crate::errors::{Failure, TypeError};
use crate::primitive::Primitive;

use super::{Attempt, Check, Input, Type, TypeKind};

/// `left | right`: the first branch that accepts the input wins.
///
/// Equality is order-sensitive even though the accepted set is not.
#[derive(Debug, Clone, PartialEq)]
pub struct Sum {
    left: Type,
    right: Type,
}

impl Sum {
    /// Create a sum
    pub fn new(left: Type, right: Type) -> Self {
        Self { left, right }
    }

    /// Branch tried first
    pub fn left(&self) -> &Type {
        &self.left
    }

    /// Branch tried second
    pub fn right(&self) -> &Type {
        &self.right
    }

    /// Whether the left branch is exactly nominal `nil`
    pub fn is_optional(&self) -> bool {
        matches!(self.left.kind(), TypeKind::Nominal(n) if n.primitive() == Primitive::Nil)
    }
}

impl Check for Sum {
    fn attempt(&self, input: Input) -> Attempt {
        let left = match self.left.try_input(input.clone()) {
            Ok(output) => return Ok(output),
            Err(failure) => failure,
        };
        match self.right.try_input(input) {
            Ok(output) => Ok(output),
            Err(right) => Err(Failure::new(
                right.input,
                TypeError::Sum {
                    left: Box::new(left.error),
                    right: Box::new(right.error),
                },
            )),
        }
    }

    fn ast(&self, meta: bool) -> Ast {
        Ast::Sum {
            left: Box::new(self.left.build_ast(meta)),
            right: Box::new(self.right.build_ast(meta)),
        }
    }
}
