// Copyright 2025 Cowboy AI, LLC.

//! Map types

use serde_json::{Map, Value};

use crate::ast::Ast;
use crate::errors::{Failure, MemberFailure, Segment, TypeError};
use crate::primitive::Primitive;

use super::{Attempt, Check, Input, Type};

/// An object whose keys all pass the key type and whose values all pass the
/// value type. Keys are checked as JSON strings and must stay strings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOf {
    key_type: Type,
    value_type: Type,
}

impl MapOf {
    /// Create a map type
    pub fn new(key_type: Type, value_type: Type) -> Self {
        Self {
            key_type,
            value_type,
        }
    }

    /// Type applied to every key
    pub fn key_type(&self) -> &Type {
        &self.key_type
    }

    /// Type applied to every value
    pub fn value_type(&self) -> &Type {
        &self.value_type
    }

    fn coerce_key(&self, key: String) -> Result<Option<String>, Failure> {
        match self.key_type.try_input(Some(Value::String(key)))? {
            Some(Value::String(coerced)) => Ok(Some(coerced)),
            Some(other) => Err(Failure::new(
                other.clone(),
                TypeError::Coercion {
                    input: other,
                    message: "map keys must be strings".to_string(),
                },
            )),
            None => Ok(None),
        }
    }
}

impl Check for MapOf {
    fn attempt(&self, input: Input) -> Attempt {
        let entries = match input {
            None => return Ok(None),
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                return Err(Failure::new(
                    other.clone(),
                    TypeError::NotACollection {
                        input: other,
                        expected: Primitive::Hash,
                    },
                ))
            }
        };

        let mut output = Map::new();
        let mut failures = Vec::new();
        for (key, value) in entries {
            let at = Segment::Key(key.clone());
            let key = match self.coerce_key(key.clone()) {
                Ok(Some(coerced)) => coerced,
                Ok(None) => continue,
                Err(failure) => {
                    failures.push(MemberFailure {
                        at,
                        error: failure.error,
                    });
                    output.insert(key, value);
                    continue;
                }
            };
            match self.value_type.try_input(Some(value)) {
                Ok(Some(coerced)) => {
                    output.insert(key, coerced);
                }
                Ok(None) => {}
                Err(failure) => {
                    output.insert(key, failure.input);
                    failures.push(MemberFailure {
                        at,
                        error: failure.error,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(Some(Value::Object(output)))
        } else {
            Err(Failure::new(
                Value::Object(output),
                TypeError::Aggregate { failures },
            ))
        }
    }

    fn ast(&self, meta: bool) -> Ast {
        Ast::Map {
            key: Box::new(self.key_type.build_ast(meta)),
            value: Box::new(self.value_type.build_ast(meta)),
        }
    }
}
