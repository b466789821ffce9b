// Copyright 2025 Cowboy AI, LLC.

//! Decorator contract
//!
//! A decorator wraps exactly one type. Whatever it does not override is
//! delegated to the wrapped type, and builder operations that produce a
//! new inner type are rebuilt inside the same decoration through
//! [`Decorator::rewrap`], so no layer is silently lost.

use super::{Type, TypeKind};

/// A type variant wrapping another type
pub trait Decorator {
    /// The wrapped type
    fn wrapped(&self) -> &Type;

    /// The same decoration around a different inner type
    fn rewrap(&self, inner: Type) -> TypeKind;
}
