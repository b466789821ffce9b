// Copyright 2025 Cowboy AI, LLC.

//! Type descriptors and the validation dispatch contract
//!
//! A [`Type`] is an immutable, cheaply cloned handle to a [`TypeKind`]. Every
//! builder method returns a new handle; the definitions it wraps are shared,
//! never copied.
//!
//! All entry points funnel into [`Type::try_input`], so the error-returning
//! [`Type::call_unsafe`], the failure-collecting [`Type::try_call`] and the
//! sentinel-returning [`Type::call_safe`] always agree on what is accepted.

mod array;
mod constrained;
mod constructor;
mod decorator;
mod defaulted;
mod enumeration;
mod lax;
mod map;
mod nominal;
mod schema;
mod sum;

use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::ast::Ast;
use crate::errors::{DefinitionError, DefinitionResult, Failure, TypeError, TypeResult};
use crate::predicates::{Predicate, Rule};
use crate::primitive::Primitive;

pub use array::ArrayOf;
pub use constrained::Constrained;
pub use constructor::{Constructor, Transform, TransformFn, TransformResult};
pub use decorator::Decorator;
pub use defaulted::Defaulted;
pub use enumeration::Enum;
pub use lax::Lax;
pub use map::MapOf;
pub use nominal::Nominal;
pub use schema::{Schema, SchemaKey, SchemaOptions, UnknownKeys};
pub use sum::Sum;

/// A value slot where `None` marks an undefined (absent) value
pub type Input = Option<Value>;

/// Annotations attached to a type without affecting validation
pub type Meta = IndexMap<String, Value>;

/// Outcome of the undefined-aware entry point
pub type Attempt = Result<Input, Failure>;

/// Behavior shared by every variant
pub(crate) trait Check {
    /// Validate and coerce one input
    fn attempt(&self, input: Input) -> Attempt;

    /// Describe the variant, recursing into children
    fn ast(&self, meta: bool) -> Ast;
}

/// The closed set of type variants
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Primitive classification
    Nominal(Nominal),
    /// Rule over a wrapped type
    Constrained(Constrained),
    /// Transforms ahead of a wrapped type
    Constructor(Constructor),
    /// Default for undefined input
    Default(Defaulted),
    /// Never-failing wrapper
    Lax(Lax),
    /// Ordered alternative
    Sum(Sum),
    /// Label to value mapping
    Enum(Enum),
    /// Homogeneous array
    Array(ArrayOf),
    /// Object with declared keys
    Schema(Schema),
    /// Object with uniform keys and values
    Map(MapOf),
}

impl TypeKind {
    fn as_check(&self) -> &dyn Check {
        match self {
            TypeKind::Nominal(t) => t,
            TypeKind::Constrained(t) => t,
            TypeKind::Constructor(t) => t,
            TypeKind::Default(t) => t,
            TypeKind::Lax(t) => t,
            TypeKind::Sum(t) => t,
            TypeKind::Enum(t) => t,
            TypeKind::Array(t) => t,
            TypeKind::Schema(t) => t,
            TypeKind::Map(t) => t,
        }
    }

    /// The decorator view of this variant, if it wraps another type
    pub fn as_decorator(&self) -> Option<&dyn Decorator> {
        match self {
            TypeKind::Constrained(t) => Some(t),
            TypeKind::Constructor(t) => Some(t),
            TypeKind::Default(t) => Some(t),
            TypeKind::Lax(t) => Some(t),
            TypeKind::Enum(t) => Some(t),
            _ => None,
        }
    }
}

/// Immutable, shareable type descriptor
#[derive(Clone)]
pub struct Type {
    kind: Arc<TypeKind>,
    meta: Arc<Meta>,
}

impl Type {
    /// Create a descriptor from a variant
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind: Arc::new(kind),
            meta: Arc::new(Meta::new()),
        }
    }

    /// A nominal type for a primitive kind
    pub fn nominal(primitive: Primitive) -> Self {
        Self::new(TypeKind::Nominal(Nominal::new(primitive)))
    }

    /// An ordered sum of two types
    pub fn sum(left: Type, right: Type) -> Self {
        Self::new(TypeKind::Sum(Sum::new(left, right)))
    }

    /// The variant this descriptor holds
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub(crate) fn with_kind(&self, kind: TypeKind) -> Self {
        Self {
            kind: Arc::new(kind),
            meta: Arc::clone(&self.meta),
        }
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Validate an input that may be undefined.
    ///
    /// `Ok(None)` means the type produced no value, either because the
    /// input was undefined and no default applies or because a transform
    /// filtered it out.
    pub fn try_input(&self, input: Input) -> Attempt {
        self.kind.as_check().attempt(input)
    }

    /// Validate a value, returning the coerced output or the failure.
    ///
    /// Never panics. A transform that produces no value at the top level is
    /// reported as [`TypeError::NotApplicable`].
    pub fn try_call(&self, input: Value) -> TypeResult {
        match self.try_input(Some(input.clone())) {
            Ok(Some(output)) => Ok(output),
            Ok(None) => Err(Failure::new(
                input.clone(),
                TypeError::NotApplicable { input },
            )),
            Err(failure) => {
                trace!("Value rejected: {}", failure.error);
                Err(failure)
            }
        }
    }

    /// Validate a value, returning the error on failure
    pub fn call_unsafe(&self, input: Value) -> Result<Value, TypeError> {
        self.try_call(input).map_err(Failure::into_error)
    }

    /// Validate a value, returning `None` on failure
    pub fn call_safe(&self, input: Value) -> Option<Value> {
        self.try_call(input).ok()
    }

    /// Validate a value, handing any failure to `on_failure` for a fallback
    pub fn call_safe_with<F>(&self, input: Value, on_failure: F) -> Value
    where
        F: FnOnce(Failure) -> Value,
    {
        self.try_call(input).unwrap_or_else(on_failure)
    }

    /// Run the type against an undefined input (produces defaults)
    pub fn call_undefined(&self) -> Result<Option<Value>, TypeError> {
        self.try_input(None).map_err(Failure::into_error)
    }

    /// Check whether a value is accepted
    pub fn is_valid(&self, value: &Value) -> bool {
        self.try_call(value.clone()).is_ok()
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Primitive kind the output ultimately satisfies
    pub fn primitive(&self) -> Primitive {
        match self.kind() {
            TypeKind::Nominal(n) => n.primitive(),
            TypeKind::Sum(s) if s.left().primitive() == s.right().primitive() => {
                s.left().primitive()
            }
            TypeKind::Sum(_) => Primitive::Any,
            TypeKind::Array(_) => Primitive::Array,
            TypeKind::Schema(_) | TypeKind::Map(_) => Primitive::Hash,
            kind => match kind.as_decorator() {
                Some(d) => d.wrapped().primitive(),
                None => Primitive::Any,
            },
        }
    }

    /// Directly wrapped type, for decorators
    pub fn wrapped(&self) -> Option<&Type> {
        self.kind().as_decorator().map(Decorator::wrapped)
    }

    /// Member type of an array, looking through decorators
    pub fn member(&self) -> Option<&Type> {
        match self.kind() {
            TypeKind::Array(a) => Some(a.member()),
            kind => kind.as_decorator()?.wrapped().member(),
        }
    }

    /// Declared keys of a hash schema, looking through decorators
    pub fn schema_keys(&self) -> Option<&IndexMap<String, SchemaKey>> {
        match self.kind() {
            TypeKind::Schema(s) => Some(s.keys()),
            kind => kind.as_decorator()?.wrapped().schema_keys(),
        }
    }

    /// Key type of a map, looking through decorators
    pub fn key_type(&self) -> Option<&Type> {
        match self.kind() {
            TypeKind::Map(m) => Some(m.key_type()),
            kind => kind.as_decorator()?.wrapped().key_type(),
        }
    }

    /// Value type of a map, looking through decorators
    pub fn value_type(&self) -> Option<&Type> {
        match self.kind() {
            TypeKind::Map(m) => Some(m.value_type()),
            kind => kind.as_decorator()?.wrapped().value_type(),
        }
    }

    /// Left branch of a sum
    pub fn left(&self) -> Option<&Type> {
        match self.kind() {
            TypeKind::Sum(s) => Some(s.left()),
            _ => None,
        }
    }

    /// Right branch of a sum
    pub fn right(&self) -> Option<&Type> {
        match self.kind() {
            TypeKind::Sum(s) => Some(s.right()),
            _ => None,
        }
    }

    /// Rule of a constrained type
    pub fn rule(&self) -> Option<&Rule> {
        match self.kind() {
            TypeKind::Constrained(c) => Some(c.rule()),
            _ => None,
        }
    }

    /// Labels of an enum, in declaration order
    pub fn enum_values(&self) -> Option<Vec<&Value>> {
        match self.kind() {
            TypeKind::Enum(e) => Some(e.values()),
            _ => None,
        }
    }

    /// Alias of [`Type::is_valid`]
    pub fn includes(&self, value: &Value) -> bool {
        self.is_valid(value)
    }

    /// Attached metadata
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Whether this type enforces a rule at its outer layer
    pub fn is_constrained(&self) -> bool {
        matches!(self.kind(), TypeKind::Constrained(_))
    }

    /// Whether undefined input yields a default value
    pub fn is_default(&self) -> bool {
        matches!(self.kind(), TypeKind::Default(_))
    }

    /// Whether this is `nil | T`
    pub fn is_optional(&self) -> bool {
        matches!(self.kind(), TypeKind::Sum(s) if s.is_optional())
    }

    /// Whether this type never fails
    pub fn is_lax(&self) -> bool {
        matches!(self.kind(), TypeKind::Lax(_))
    }

    /// Composition tree without metadata
    pub fn to_ast(&self) -> Ast {
        self.build_ast(false)
    }

    /// Composition tree with metadata nodes
    pub fn to_ast_with_meta(&self) -> Ast {
        self.build_ast(true)
    }

    pub(crate) fn build_ast(&self, meta: bool) -> Ast {
        let node = self.kind.as_check().ast(meta);
        if meta && !self.meta.is_empty() {
            Ast::Annotated {
                node: Box::new(node),
                meta: self.meta.as_ref().clone(),
            }
        } else {
            node
        }
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    /// Attach one metadata entry
    pub fn with_meta(&self, key: impl Into<String>, value: Value) -> Self {
        let mut meta = self.meta.as_ref().clone();
        meta.insert(key.into(), value);
        Self {
            kind: Arc::clone(&self.kind),
            meta: Arc::new(meta),
        }
    }

    /// Same definition without metadata
    pub fn pristine(&self) -> Self {
        Self::new(self.kind.as_ref().clone())
    }

    /// Enforce predicates on the output of this type.
    ///
    /// Decorators keep their decoration: a constrained constructor is a
    /// constructor over the constrained inner type. Rules on an already
    /// constrained type are extended, and an optional type constrains its
    /// non-nil branch. A default is checked again against the narrowed type
    /// and fails with [`DefinitionError::InvalidDefault`] if it no longer fits.
    pub fn constrained(
        &self,
        predicates: impl IntoIterator<Item = Predicate>,
    ) -> DefinitionResult<Self> {
        let predicates: Vec<Predicate> = predicates.into_iter().collect();
        let kind = match self.kind() {
            TypeKind::Constrained(c) => TypeKind::Constrained(c.and(predicates)),
            TypeKind::Sum(s) if s.is_optional() => {
                return Ok(self.adopt(s.right().constrained(predicates)?.optional()));
            }
            TypeKind::Default(d) => {
                let narrowed = d.wrapped().constrained(predicates)?;
                return Ok(self.adopt(narrowed.default(d.value().clone())?));
            }
            kind => match kind.as_decorator() {
                Some(d) => d.rewrap(d.wrapped().constrained(predicates)?),
                None => {
                    return Ok(Self::new(TypeKind::Constrained(Constrained::new(
                        self.clone(),
                        Rule::new(predicates),
                    ))))
                }
            },
        };
        Ok(self.with_kind(kind))
    }

    /// `other`'s definition under this type's metadata
    fn adopt(&self, other: Type) -> Self {
        Self {
            kind: other.kind,
            meta: Arc::clone(&self.meta),
        }
    }

    /// Apply a transform before this type.
    ///
    /// On a constructor the new transform runs first, ahead of the existing
    /// steps.
    pub fn constructor(&self, transform: Transform) -> Self {
        match self.kind() {
            TypeKind::Constructor(c) => self.with_kind(TypeKind::Constructor(c.prepend(transform))),
            _ => Self::new(TypeKind::Constructor(Constructor::new(self.clone(), transform))),
        }
    }

    /// Restrict to a fixed list of labels
    pub fn enumeration(&self, labels: impl IntoIterator<Item = Value>) -> DefinitionResult<Self> {
        self.enum_mapping(labels.into_iter().map(|label| (label.clone(), label)))
    }

    /// Restrict to labels, also accepting each label's raw value
    pub fn enum_mapping(
        &self,
        mapping: impl IntoIterator<Item = (Value, Value)>,
    ) -> DefinitionResult<Self> {
        let mapping: Vec<(Value, Value)> = mapping.into_iter().collect();
        let labels = mapping.iter().map(|(label, _)| label.clone()).collect();
        let restricted = self.constrained([Predicate::IncludedIn(labels)])?;
        Enum::new(restricted, mapping).map(|e| Self::new(TypeKind::Enum(e)))
    }

    /// Substitute `value` for undefined input.
    ///
    /// The default must itself be accepted by this type. Enums reject this
    /// call; set the default before restricting to an enum.
    pub fn default(&self, value: Value) -> DefinitionResult<Self> {
        if let TypeKind::Enum(_) = self.kind() {
            warn!("Rejected default {} on an enum type", value);
            return Err(DefinitionError::DefaultAfterEnum);
        }
        if let Err(failure) = self.try_call(value.clone()) {
            warn!("Rejected default {}: {}", value, failure.error);
            return Err(DefinitionError::InvalidDefault {
                value,
                error: failure.error,
            });
        }
        debug!("Attached default {}", value);
        Ok(Self::new(TypeKind::Default(Defaulted::new(self.clone(), value))))
    }

    /// A never-failing version of this type with every constraint removed
    pub fn lax(&self) -> Self {
        if self.is_lax() {
            return self.clone();
        }
        debug!("Building lax type from {}", self.to_ast().tag());
        Self {
            kind: Arc::new(TypeKind::Lax(Lax::new(self.strip()))),
            meta: Arc::clone(&self.meta),
        }
    }

    pub(crate) fn strip(&self) -> Self {
        match self.kind() {
            TypeKind::Nominal(_) => self.clone(),
            TypeKind::Constrained(c) => c.wrapped().strip(),
            TypeKind::Lax(l) => l.wrapped().strip(),
            TypeKind::Sum(s) => {
                self.with_kind(TypeKind::Sum(Sum::new(s.left().strip(), s.right().strip())))
            }
            TypeKind::Array(a) => self.with_kind(TypeKind::Array(ArrayOf::new(a.member().strip()))),
            TypeKind::Schema(s) => self.with_kind(TypeKind::Schema(s.map_types(Type::strip))),
            TypeKind::Map(m) => self.with_kind(TypeKind::Map(MapOf::new(
                m.key_type().strip(),
                m.value_type().strip(),
            ))),
            kind => match kind.as_decorator() {
                Some(d) => self.with_kind(d.rewrap(d.wrapped().strip())),
                None => self.clone(),
            },
        }
    }

    /// `nil | self`
    pub fn optional(&self) -> Self {
        Self::sum(Self::nominal(Primitive::Nil), self.clone())
    }

    /// An array whose elements are of this type
    pub fn array(&self) -> Self {
        Self::new(TypeKind::Array(ArrayOf::new(self.clone())))
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind) || self.kind == other.kind
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Type");
        out.field("kind", self.kind.as_ref());
        if !self.meta.is_empty() {
            out.field("meta", self.meta.as_ref());
        }
        out.finish()
    }
}

impl BitOr for Type {
    type Output = Type;

    fn bitor(self, rhs: Type) -> Type {
        Type::sum(self, rhs)
    }
}

impl BitOr<&Type> for &Type {
    type Output = Type;

    fn bitor(self, rhs: &Type) -> Type {
        Type::sum(self.clone(), rhs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn integer() -> Type {
        Type::nominal(Primitive::Integer)
    }

    #[test]
    fn test_descriptors_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Type>();
    }

    #[test]
    fn test_entry_points_agree() {
        let t = integer().constrained([Predicate::Gt(2.into())]).unwrap();
        for input in [json!(3), json!(1), json!("3"), json!(null)] {
            let tried = t.try_call(input.clone());
            let called = t.call_unsafe(input.clone());
            assert_eq!(tried.clone().map_err(|f| f.error), called);
            assert_eq!(tried.clone().ok(), t.call_safe(input.clone()));
            assert_eq!(tried.is_ok(), t.is_valid(&input));
        }
    }

    #[test]
    fn test_call_safe_with_receives_failure() {
        let t = integer();
        let out = t.call_safe_with(json!("x"), |failure| json!(format!("error: {}", failure)));
        assert_eq!(
            out,
            json!("error: \"x\" violates constraints (type?(\"integer\", \"x\") failed)")
        );
    }

    #[test]
    fn test_meta_is_excluded_from_equality() {
        let plain = integer();
        let annotated = plain.with_meta("doc", json!("an id"));
        assert_eq!(plain, annotated);
        assert_eq!(annotated.meta().get("doc"), Some(&json!("an id")));
        assert!(annotated.pristine().meta().is_empty());
        assert_ne!(plain.to_ast_with_meta(), annotated.to_ast_with_meta());
    }

    #[test]
    fn test_constrained_extends_rule() {
        let t = integer()
            .constrained([Predicate::Gt(0.into())])
            .unwrap()
            .constrained([Predicate::Lt(10.into())])
            .unwrap();
        assert_eq!(t.rule().map(|r| r.predicates().len()), Some(2));
        assert_eq!(t.wrapped(), Some(&integer()));
        assert!(!t.is_valid(&json!(10)));
    }

    #[test]
    fn test_constrained_optional_stays_optional() {
        let t = integer()
            .optional()
            .constrained([Predicate::Gt(0.into())])
            .unwrap();
        assert!(t.is_optional());
        assert!(t.is_valid(&json!(null)));
        assert!(t.is_valid(&json!(1)));
        assert!(!t.is_valid(&json!(0)));
    }

    #[test]
    fn test_primitive_through_decorators() {
        let t = integer()
            .constrained([Predicate::Odd])
            .unwrap()
            .default(json!(1))
            .unwrap();
        assert_eq!(t.primitive(), Primitive::Integer);
        assert_eq!((integer() | Type::nominal(Primitive::String)).primitive(), Primitive::Any);
    }

    #[test]
    fn test_sum_operator_builds_sum() {
        let t = &integer() | &Type::nominal(Primitive::String);
        assert_eq!(t.left(), Some(&integer()));
        assert!(t.is_valid(&json!("a")));
        assert!(!t.is_valid(&json!(true)));
    }
}
