// Copyright 2025 Cowboy AI, LLC.

//! Array-of types

use serde_json::Value;

use crate::ast::Ast;
use crate::errors::{Failure, MemberFailure, Segment, TypeError};
use crate::primitive::Primitive;

use super::{Attempt, Check, Input, Type};

/// An array whose every element passes the member type.
///
/// All elements are checked, so a failure lists every offending index.
/// Elements for which the member type produces no value are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayOf {
    member: Type,
}

impl ArrayOf {
    /// Create an array type
    pub fn new(member: Type) -> Self {
        Self { member }
    }

    /// Element type
    pub fn member(&self) -> &Type {
        &self.member
    }
}

impl Check for ArrayOf {
    fn attempt(&self, input: Input) -> Attempt {
        let items = match input {
            None => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Failure::new(
                    other.clone(),
                    TypeError::NotACollection {
                        input: other,
                        expected: Primitive::Array,
                    },
                ))
            }
        };

        let mut output = Vec::with_capacity(items.len());
        let mut failures = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            match self.member.try_input(Some(item)) {
                Ok(Some(coerced)) => output.push(coerced),
                Ok(None) => {}
                Err(failure) => {
                    output.push(failure.input);
                    failures.push(MemberFailure {
                        at: Segment::Index(index),
                        error: failure.error,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(Some(Value::Array(output)))
        } else {
            Err(Failure::new(
                Value::Array(output),
                TypeError::Aggregate { failures },
            ))
        }
    }

    fn ast(&self, meta: bool) -> Ast {
        Ast::Array {
            member: Box::new(self.member.build_ast(meta)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercions;
    use crate::predicates::Predicate;
    use serde_json::json;

    #[test]
    fn test_coerces_each_member() {
        let t = Type::nominal(Primitive::Integer)
            .constructor(coercions::to_integer())
            .constrained([Predicate::Gt(2.into())])
            .unwrap()
            .array();
        assert_eq!(t.call_unsafe(json!(["3", "4", "5"])), Ok(json!([3, 4, 5])));
    }

    #[test]
    fn test_not_an_array() {
        let t = Type::nominal(Primitive::String).array();
        let failure = t.try_call(json!("X")).unwrap_err();
        assert_eq!(failure.to_string(), "\"X\" is not an array");
        assert_eq!(failure.error.failure_count(), 1);
    }

    #[test]
    fn test_failure_carries_partially_coerced_array() {
        let t = Type::nominal(Primitive::Integer)
            .constructor(coercions::to_integer())
            .array();
        let out = t.call_safe_with(json!(["1", 2, "foo"]), |failure| failure.input);
        assert_eq!(out, json!([1, 2, "foo"]));
    }

    #[test]
    fn test_undefined_array_stays_undefined() {
        let t = Type::nominal(Primitive::String).array();
        assert_eq!(t.try_input(None), Ok(None));
    }
}
