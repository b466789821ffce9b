// Copyright 2025 Cowboy AI, LLC.

//! Free-function construction interface
//!
//! Each function returns a new immutable [`Type`]. They are thin wrappers
//! over the builder methods on [`Type`], for callers who prefer to read a
//! definition inside out.
//!
//! ```
//! use cim_types::builder::{array_of, constrained, hash_schema, nominal};
//! use cim_types::{Predicate, Primitive};
//! use serde_json::json;
//!
//! let tags = array_of(&constrained(&nominal(Primitive::String), [Predicate::Filled]).unwrap());
//! let post = hash_schema([("title", nominal(Primitive::String)), ("tags?", tags)]);
//!
//! assert!(post.is_valid(&json!({"title": "Hello", "tags": ["rust"]})));
//! assert!(!post.is_valid(&json!({"tags": [""]})));
//! ```

use serde_json::Value;

use crate::errors::DefinitionResult;
use crate::predicates::{Predicate, Rule};
use crate::primitive::Primitive;
use crate::types::{Constrained, MapOf, Schema, Transform, Type, TypeKind};

/// A type that only classifies its input
pub fn nominal(primitive: Primitive) -> Type {
    Type::nominal(primitive)
}

/// A nominal type whose kind check is also recorded as a `type?` predicate
pub fn strict(primitive: Primitive) -> Type {
    ruled(primitive, Predicate::Type(primitive))
}

/// `base` with predicates enforced on its output
pub fn constrained(
    base: &Type,
    predicates: impl IntoIterator<Item = Predicate>,
) -> DefinitionResult<Type> {
    base.constrained(predicates)
}

/// `base` restricted to a label to raw value mapping
pub fn enum_type(
    base: &Type,
    mapping: impl IntoIterator<Item = (Value, Value)>,
) -> DefinitionResult<Type> {
    base.enum_mapping(mapping)
}

/// `left | right`
pub fn sum(left: &Type, right: &Type) -> Type {
    Type::sum(left.clone(), right.clone())
}

/// `base` with a transform applied ahead of it
pub fn constructor(base: &Type, transform: Transform) -> Type {
    base.constructor(transform)
}

/// An array of `member`
pub fn array_of(member: &Type) -> Type {
    member.array()
}

/// An object with declared fields; a name ending in `?` is optional
pub fn hash_schema<K>(fields: impl IntoIterator<Item = (K, Type)>) -> Type
where
    K: Into<String>,
{
    Type::new(TypeKind::Schema(Schema::from_fields(fields)))
}

/// An object with uniform keys and values
pub fn map(key_type: &Type, value_type: &Type) -> Type {
    Type::new(TypeKind::Map(MapOf::new(key_type.clone(), value_type.clone())))
}

/// A type accepting only values equal to `value`
pub fn value(value: Value) -> Type {
    ruled(kind_of(&value), Predicate::Eql(value))
}

/// A type accepting only `constant`.
///
/// JSON values have no identity, so this differs from [`value`] only in the
/// predicate it records.
pub fn constant(constant: Value) -> Type {
    ruled(kind_of(&constant), Predicate::Is(constant))
}

// a bare nominal carries no default, so the rule needs no re-check
fn ruled(primitive: Primitive, predicate: Predicate) -> Type {
    Type::new(TypeKind::Constrained(Constrained::new(
        nominal(primitive),
        Rule::new([predicate]),
    )))
}

fn kind_of(value: &Value) -> Primitive {
    match value {
        Value::Null => Primitive::Nil,
        Value::Bool(_) => Primitive::Bool,
        Value::Number(n) if n.is_f64() => Primitive::Float,
        Value::Number(_) => Primitive::Integer,
        Value::String(_) => Primitive::String,
        Value::Array(_) => Primitive::Array,
        Value::Object(_) => Primitive::Hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ast;
    use crate::errors::DefinitionError;
    use serde_json::json;

    #[test]
    fn test_strict_records_type_predicate() {
        let t = strict(Primitive::Integer);
        assert_eq!(t.to_ast().spine(), vec!["constrained", "nominal"]);
        assert!(t.is_valid(&json!(1)));
        assert!(!t.is_valid(&json!("1")));
    }

    #[test]
    fn test_value_and_constant() {
        let v = value(json!("admin"));
        assert!(v.is_valid(&json!("admin")));
        assert!(!v.is_valid(&json!("user")));
        assert_eq!(v.primitive(), Primitive::String);

        let c = constant(json!(3));
        assert_eq!(c.primitive(), Primitive::Integer);
        let Ast::Constrained { rule, .. } = c.to_ast() else {
            panic!("expected constrained node");
        };
        assert_eq!(rule[0].predicate, "is?");
    }

    #[test]
    fn test_enum_type_validates_mapping() {
        let base = nominal(Primitive::String);
        let err = enum_type(&base, [(json!("a"), json!(1)), (json!("b"), json!(1))]).unwrap_err();
        assert!(matches!(err, DefinitionError::NonBijectiveEnum { .. }));
        let t = enum_type(&base, [(json!("a"), json!(1)), (json!("b"), json!(2))]).unwrap();
        assert_eq!(t.call_unsafe(json!(2)), Ok(json!("b")));
    }

    #[test]
    fn test_sum_is_ordered() {
        let a = nominal(Primitive::Integer);
        let b = nominal(Primitive::String);
        assert_ne!(sum(&a, &b), sum(&b, &a));
        assert_eq!(sum(&a, &b), sum(&a, &b));
    }

    #[test]
    fn test_map_builder() {
        let t = map(&nominal(Primitive::String), &nominal(Primitive::Bool));
        assert_eq!(t.primitive(), Primitive::Hash);
        assert_eq!(t.value_type(), Some(&nominal(Primitive::Bool)));
        assert!(!t.is_valid(&json!({"a": 1})));
    }
}
