// Copyright 2025 Cowboy AI, LLC.

//! Constructor types: transforms applied ahead of a wrapped type

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::ast::Ast;
use crate::errors::{Failure, TypeError};

use super::{Attempt, Check, Decorator, Input, Type, TypeKind};

/// Output of a transform: a value, no value (`Ok(None)`), or a reason it failed
pub type TransformResult = Result<Option<Value>, String>;

/// Signature of a transform
pub type TransformFn = dyn Fn(Value) -> TransformResult + Send + Sync;

static ANONYMOUS: AtomicU64 = AtomicU64::new(0);

/// A named value transform.
///
/// Transforms compare equal when their names are equal, so a name is a
/// claim of identity. Anonymous transforms get a unique generated name.
#[derive(Clone)]
pub struct Transform {
    name: Arc<str>,
    func: Arc<TransformFn>,
}

impl Transform {
    /// Create a named transform
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> TransformResult + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    /// Create a transform that only equals its own clones
    pub fn anonymous<F>(func: F) -> Self
    where
        F: Fn(Value) -> TransformResult + Send + Sync + 'static,
    {
        let id = ANONYMOUS.fetch_add(1, Ordering::Relaxed);
        Self::new(format!("fn#{id}"), func)
    }

    /// A transform that always produces a value
    pub fn map<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::new(name, move |v| Ok(Some(func(v))))
    }

    /// Transform name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the transform
    pub fn apply(&self, input: Value) -> TransformResult {
        (self.func)(input)
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

/// Runs transform steps in order, then hands the result to the wrapped type.
///
/// A step that yields no value stops the chain and the constructor yields no
/// value; array and schema members treat that as "drop this element".
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    wrapped: Type,
    steps: Vec<Transform>,
}

impl Constructor {
    /// Wrap a type with a transform
    pub fn new(wrapped: Type, transform: Transform) -> Self {
        Self {
            wrapped,
            steps: vec![transform],
        }
    }

    /// Transform steps in application order
    pub fn steps(&self) -> &[Transform] {
        &self.steps
    }

    /// A constructor running `transform` before the existing steps
    pub fn prepend(&self, transform: Transform) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.push(transform);
        steps.extend(self.steps.iter().cloned());
        Self {
            wrapped: self.wrapped.clone(),
            steps,
        }
    }

    fn transform(&self, input: Value) -> Result<Option<Value>, Failure> {
        let mut current = input;
        for step in &self.steps {
            match step.apply(current.clone()) {
                Ok(Some(next)) => current = next,
                Ok(None) => return Ok(None),
                Err(message) => {
                    return Err(Failure::new(
                        current.clone(),
                        TypeError::Coercion {
                            input: current,
                            message,
                        },
                    ))
                }
            }
        }
        Ok(Some(current))
    }
}

impl Decorator for Constructor {
    fn wrapped(&self) -> &Type {
        &self.wrapped
    }

    fn rewrap(&self, inner: Type) -> TypeKind {
        TypeKind::Constructor(Self {
            wrapped: inner,
            steps: self.steps.clone(),
        })
    }
}

impl Check for Constructor {
    fn attempt(&self, input: Input) -> Attempt {
        match input {
            None => self.wrapped.try_input(None),
            Some(value) => match self.transform(value)? {
                Some(transformed) => self.wrapped.try_input(Some(transformed)),
                None => Ok(None),
            },
        }
    }

    fn ast(&self, meta: bool) -> Ast {
        Ast::Constructor {
            wrapped: Box::new(self.wrapped.build_ast(meta)),
            steps: self.steps.iter().map(|s| s.name().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;
    use serde_json::json;

    fn trim() -> Transform {
        Transform::map("trim", |v| match v {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other,
        })
    }

    fn upcase() -> Transform {
        Transform::map("upcase", |v| match v {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        })
    }

    #[test]
    fn test_newest_transform_runs_first() {
        let seen = Transform::new("reject_padded", |v| match v.as_str() {
            Some(s) if s.starts_with(' ') => Err("padded".to_string()),
            _ => Ok(Some(v)),
        });
        let t = Type::nominal(Primitive::String)
            .constructor(seen)
            .constructor(trim());
        assert_eq!(t.call_unsafe(json!("  a")), Ok(json!("a")));
        let TypeKind::Constructor(c) = t.kind() else {
            panic!("expected constructor");
        };
        let names: Vec<_> = c.steps().iter().map(Transform::name).collect();
        assert_eq!(names, vec!["trim", "reject_padded"]);
    }

    #[test]
    fn test_failed_transform_is_a_coercion_error() {
        let t = Type::nominal(Primitive::String).constructor(Transform::new("never", |_| {
            Err("not today".to_string())
        }));
        let err = t.call_unsafe(json!("x")).unwrap_err();
        assert!(err.is_coercion_error());
        assert_eq!(err.to_string(), "\"x\" cannot be coerced: not today");
    }

    #[test]
    fn test_no_value_at_top_level_is_not_applicable() {
        let t = Type::nominal(Primitive::String).constructor(Transform::new("drop", |_| Ok(None)));
        assert_eq!(t.try_input(Some(json!("x"))), Ok(None));
        assert_eq!(
            t.call_unsafe(json!("x")),
            Err(TypeError::NotApplicable { input: json!("x") })
        );
    }

    #[test]
    fn test_transform_equality_is_by_name() {
        assert_eq!(trim(), trim());
        assert_ne!(trim(), upcase());
        let anon = Transform::anonymous(|v| Ok(Some(v)));
        assert_eq!(anon, anon.clone());
        assert_ne!(anon, Transform::anonymous(|v| Ok(Some(v))));
    }
}
