// Copyright 2025 Cowboy AI, LLC.

//! Constrained types

use crate::ast::{Ast, PredicateAst};
use crate::errors::{Failure, TypeError};
use crate::predicates::{Predicate, Rule};

use super::{Attempt, Check, Decorator, Input, Type, TypeKind};

/// A wrapped type whose output must also satisfy a rule.
///
/// The wrapped type runs first, so predicates see its coerced output.
#[derive(Debug, Clone, PartialEq)]
pub struct Constrained {
    wrapped: Type,
    rule: Rule,
}

impl Constrained {
    /// Constrain a type
    pub fn new(wrapped: Type, rule: Rule) -> Self {
        Self { wrapped, rule }
    }

    /// The enforced rule
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The same wrapped type with more predicates
    pub fn and(&self, more: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            wrapped: self.wrapped.clone(),
            rule: self.rule.and(more),
        }
    }
}

impl Decorator for Constrained {
    fn wrapped(&self) -> &Type {
        &self.wrapped
    }

    fn rewrap(&self, inner: Type) -> TypeKind {
        TypeKind::Constrained(Self::new(inner, self.rule.clone()))
    }
}

impl Check for Constrained {
    fn attempt(&self, input: Input) -> Attempt {
        let Some(value) = self.wrapped.try_input(input)? else {
            return Ok(None);
        };
        match self.rule.evaluate(&value) {
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

    fn ast(&self, meta: bool) -> Ast {
        Ast::Constrained {
            wrapped: Box::new(self.wrapped.build_ast(meta)),
            rule: self
                .rule
                .predicates()
                .iter()
                .map(|p| PredicateAst {
                    predicate: p.name().to_string(),
                    args: p.args(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;
    use serde_json::json;

    fn positive() -> Constrained {
        Constrained::new(
            Type::nominal(Primitive::Integer),
            Rule::new([Predicate::Gt(0.into())]),
        )
    }

    #[test]
    fn test_rule_applies_after_wrapped_type() {
        let failure = positive().attempt(Some(json!("5"))).unwrap_err();
        assert!(failure.to_string().contains("type?"));

        let failure = positive().attempt(Some(json!(-1))).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "-1 violates constraints (gt?(0, -1) failed)"
        );
    }

    #[test]
    fn test_undefined_is_left_alone() {
        assert_eq!(positive().attempt(None), Ok(None));
    }

    #[test]
    fn test_ast_lists_predicates_in_order() {
        let c = positive().and([Predicate::Odd]);
        let Ast::Constrained { rule, .. } = c.ast(false) else {
            panic!("expected constrained node");
        };
        let names: Vec<_> = rule.iter().map(|p| p.predicate.as_str()).collect();
        assert_eq!(names, vec!["gt?", "odd?"]);
    }
}
