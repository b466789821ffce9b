// Copyright 2025 Cowboy AI, LLC.

//! Optional values as `Option`
//!
//! A [`Maybe`] wraps `nil | T` and reports absence as `None` instead of as a
//! JSON `null`, so callers can use the `Option` combinators directly.

use serde_json::Value;

use crate::errors::TypeError;
use crate::primitive::Primitive;
use crate::types::Type;

/// `nil | T` with `None` for absent or `null` input
#[derive(Debug, Clone, PartialEq)]
pub struct Maybe {
    type_: Type,
}

impl Maybe {
    /// The wrapped `nil | T` sum
    pub fn type_(&self) -> &Type {
        &self.type_
    }

    /// Validate an optional value.
    ///
    /// Undefined input and `null` give `Ok(None)`; anything else is checked
    /// and the output is `Some` unless the type itself produced `null`.
    pub fn call(&self, input: Option<Value>) -> Result<Option<Value>, TypeError> {
        match input {
            None | Some(Value::Null) => Ok(None),
            Some(value) => match self.type_.call_unsafe(value)? {
                Value::Null => Ok(None),
                output => Ok(Some(output)),
            },
        }
    }

    /// Like [`Maybe::call`], but a failure is also `None`
    pub fn call_safe(&self, input: Option<Value>) -> Option<Value> {
        self.call(input).ok().flatten()
    }

    /// Check an optional value and transform the present output
    pub fn map<T, F>(&self, input: Option<Value>, f: F) -> Result<Option<T>, TypeError>
    where
        F: FnOnce(Value) -> T,
    {
        Ok(self.call(input)?.map(f))
    }
}

impl Type {
    /// This type as an `Option`-returning wrapper over `nil | self`
    pub fn maybe(&self) -> Maybe {
        Maybe {
            type_: Type::sum(Type::nominal(Primitive::Nil), self.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercions;
    use serde_json::json;

    fn age() -> Maybe {
        Type::nominal(Primitive::Integer)
            .constructor(coercions::to_integer())
            .maybe()
    }

    #[test]
    fn test_absent_and_null_are_none() {
        assert_eq!(age().call(None), Ok(None));
        assert_eq!(age().call(Some(json!(null))), Ok(None));
    }

    #[test]
    fn test_present_value_is_checked() {
        assert_eq!(age().call(Some(json!("41"))), Ok(Some(json!(41))));
        assert!(age().call(Some(json!("old"))).is_err());
        assert_eq!(age().call_safe(Some(json!("old"))), None);
    }

    #[test]
    fn test_map_over_output() {
        let doubled = age().map(Some(json!(4)), |v| v.as_i64().map(|n| n * 2));
        assert_eq!(doubled, Ok(Some(Some(8))));
        assert!(age().type_().is_optional());
    }
}
