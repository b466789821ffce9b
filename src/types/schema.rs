// Copyright 2025 Cowboy AI, LLC.

//! Hash schemas

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ast::{Ast, KeyAst};
use crate::errors::{Failure, MemberFailure, Segment, TypeError};
use crate::primitive::Primitive;

use super::{Attempt, Check, Input, Type, TypeKind};

/// What a schema does with keys it does not declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Drop them from the output (default)
    #[default]
    Ignore,
    /// Fail once per unknown key
    Reject,
    /// Copy them to the output unchecked
    Preserve,
}

/// Schema configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaOptions {
    /// Policy for undeclared keys
    #[serde(default)]
    pub unknown_keys: UnknownKeys,
}

/// One declared key
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaKey {
    type_: Type,
    required: bool,
}

impl SchemaKey {
    /// A key that must be present (or defaulted)
    pub fn required(type_: Type) -> Self {
        Self {
            type_,
            required: true,
        }
    }

    /// A key that may be omitted
    pub fn optional(type_: Type) -> Self {
        Self {
            type_,
            required: false,
        }
    }

    /// Type of the value under this key
    pub fn type_(&self) -> &Type {
        &self.type_
    }

    /// Whether the key must be present
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// An object with declared keys.
///
/// Every key is checked and every failure is reported under the key name.
/// A missing key is first offered to its type as undefined, so defaults
/// fill it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    keys: IndexMap<String, SchemaKey>,
    options: SchemaOptions,
}

impl Schema {
    /// Create a schema from declared keys
    pub fn new(keys: IndexMap<String, SchemaKey>, options: SchemaOptions) -> Self {
        Self { keys, options }
    }

    /// Create a schema from field names; a trailing `?` marks a key optional
    pub fn from_fields<K>(fields: impl IntoIterator<Item = (K, Type)>) -> Self
    where
        K: Into<String>,
    {
        let keys = fields
            .into_iter()
            .map(|(name, type_)| {
                let name: String = name.into();
                match name.strip_suffix('?') {
                    Some(bare) => (bare.to_string(), SchemaKey::optional(type_)),
                    None => (name, SchemaKey::required(type_)),
                }
            })
            .collect();
        Self::new(keys, SchemaOptions::default())
    }

    /// Declared keys in order
    pub fn keys(&self) -> &IndexMap<String, SchemaKey> {
        &self.keys
    }

    /// Schema configuration
    pub fn options(&self) -> SchemaOptions {
        self.options
    }

    /// The same keys under a different unknown-key policy
    pub fn with_unknown_keys(&self, unknown_keys: UnknownKeys) -> Self {
        Self {
            keys: self.keys.clone(),
            options: SchemaOptions { unknown_keys },
        }
    }

    /// Keys of both schemas; keys of `other` replace same-named ones
    pub fn merge(&self, other: &Schema) -> Self {
        let mut keys = self.keys.clone();
        keys.extend(other.keys.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            keys,
            options: self.options,
        }
    }

    /// Apply `f` to every key type
    pub fn map_types(&self, f: impl Fn(&Type) -> Type) -> Self {
        Self {
            keys: self
                .keys
                .iter()
                .map(|(name, key)| {
                    (
                        name.clone(),
                        SchemaKey {
                            type_: f(&key.type_),
                            required: key.required,
                        },
                    )
                })
                .collect(),
            options: self.options,
        }
    }
}

impl Check for Schema {
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
        for (name, key) in &self.keys {
            match key.type_.try_input(entries.get(name).cloned()) {
                Ok(Some(coerced)) => {
                    output.insert(name.clone(), coerced);
                }
                Ok(None) if key.required => failures.push(MemberFailure {
                    at: Segment::Key(name.clone()),
                    error: TypeError::MissingKey { key: name.clone() },
                }),
                Ok(None) => {}
                Err(failure) => {
                    output.insert(name.clone(), failure.input);
                    failures.push(MemberFailure {
                        at: Segment::Key(name.clone()),
                        error: failure.error,
                    });
                }
            }
        }

        for (name, value) in entries {
            if self.keys.contains_key(&name) {
                continue;
            }
            match self.options.unknown_keys {
                UnknownKeys::Ignore => {}
                UnknownKeys::Preserve => {
                    output.insert(name, value);
                }
                UnknownKeys::Reject => failures.push(MemberFailure {
                    at: Segment::Key(name.clone()),
                    error: TypeError::UnknownKey { key: name },
                }),
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
        Ast::Schema {
            keys: self
                .keys
                .iter()
                .map(|(name, key)| KeyAst {
                    name: name.clone(),
                    required: key.required,
                    type_ast: key.type_.build_ast(meta),
                })
                .collect(),
            unknown_keys: self.options.unknown_keys,
        }
    }
}

impl Type {
    /// Change the unknown-key policy of a schema, looking through decorators.
    /// Other types are returned unchanged.
    pub fn with_unknown_keys(&self, unknown_keys: UnknownKeys) -> Type {
        match self.kind() {
            TypeKind::Schema(s) => self.with_kind(TypeKind::Schema(s.with_unknown_keys(unknown_keys))),
            kind => match kind.as_decorator() {
                Some(d) => self.with_kind(d.rewrap(d.wrapped().with_unknown_keys(unknown_keys))),
                None => self.clone(),
            },
        }
    }

    /// A schema that rejects undeclared keys
    pub fn strict(&self) -> Type {
        self.with_unknown_keys(UnknownKeys::Reject)
    }

    /// Merge the keys of two schemas; `None` unless both are schemas
    pub fn merge_schema(&self, other: &Type) -> Option<Type> {
        match (self.kind(), other.kind()) {
            (TypeKind::Schema(a), TypeKind::Schema(b)) => {
                Some(self.with_kind(TypeKind::Schema(a.merge(b))))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::Predicate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user() -> Type {
        Type::new(TypeKind::Schema(Schema::from_fields([
            (
                "name",
                Type::nominal(Primitive::String).constrained([Predicate::Filled]).unwrap(),
            ),
            ("age?", Type::nominal(Primitive::Integer)),
            (
                "role",
                Type::nominal(Primitive::String).default(json!("member")).unwrap(),
            ),
        ])))
    }

    #[test]
    fn test_optional_and_defaulted_keys() {
        assert_eq!(
            user().call_unsafe(json!({"name": "Ann"})),
            Ok(json!({"name": "Ann", "role": "member"}))
        );
        let keys = user().schema_keys().unwrap().clone();
        assert!(!keys["age"].is_required());
        assert!(keys["name"].is_required());
    }

    #[test]
    fn test_every_offending_field_is_reported() {
        let err = user()
            .call_unsafe(json!({"age": "old", "role": 4}))
            .unwrap_err();
        let at: Vec<_> = err.member_failures().iter().map(|f| f.at.clone()).collect();
        assert_eq!(
            at,
            vec![
                Segment::Key("name".to_string()),
                Segment::Key("age".to_string()),
                Segment::Key("role".to_string()),
            ]
        );
        assert_eq!(
            err.member_failures()[0].error,
            TypeError::MissingKey {
                key: "name".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_key_policies() {
        let input = json!({"name": "Ann", "extra": true});
        assert_eq!(
            user().call_unsafe(input.clone()),
            Ok(json!({"name": "Ann", "role": "member"}))
        );
        assert_eq!(
            user().with_unknown_keys(UnknownKeys::Preserve).call_unsafe(input.clone()),
            Ok(json!({"name": "Ann", "role": "member", "extra": true}))
        );
        let err = user().strict().call_unsafe(input).unwrap_err();
        assert_eq!(err.to_string(), "extra: extra is not allowed");
    }

    #[test]
    fn test_merge_replaces_same_named_keys() {
        let extra = Type::new(TypeKind::Schema(Schema::from_fields([(
            "name",
            Type::nominal(Primitive::Any),
        )])));
        let merged = user().merge_schema(&extra).unwrap();
        assert!(merged.is_valid(&json!({"name": ""})));
        assert!(!user().is_valid(&json!({"name": ""})));
        assert!(user().merge_schema(&Type::nominal(Primitive::Hash)).is_none());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: SchemaOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options.unknown_keys, UnknownKeys::Ignore);
        let options: SchemaOptions =
            serde_json::from_value(json!({"unknown_keys": "reject"})).unwrap();
        assert_eq!(options.unknown_keys, UnknownKeys::Reject);
    }
}
