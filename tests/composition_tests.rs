use std::cell::RefCell;

use cim_types::builder::{array_of, constrained, constructor, hash_schema, map, nominal, sum};
use cim_types::coercions;
use cim_types::standard::{coercible, params, strict};
use cim_types::{Ast, Predicate, Primitive, Segment, Type, TypeError, UnknownKeys};
use pretty_assertions::assert_eq;
use serde_json::json;

fn positive_integer() -> Type {
    constrained(&coercible::integer(), [Predicate::Gt(0.into())]).unwrap()
}

#[test]
fn array_reports_every_failing_index() {
    let t = array_of(&positive_integer());
    let failure = t.try_call(json!(["-1", "2", "x"])).unwrap_err();

    let at: Vec<_> = failure
        .error
        .member_failures()
        .iter()
        .map(|f| f.at.clone())
        .collect();
    assert_eq!(at, vec![Segment::Index(0), Segment::Index(2)]);
    assert_eq!(failure.error.failure_count(), 2);

    let seen = RefCell::new(Vec::new());
    let out = t.call_safe_with(json!(["-1", "2", "x"]), |failure| {
        seen.borrow_mut().extend(
            failure
                .error
                .member_failures()
                .iter()
                .map(|f| f.at.to_string()),
        );
        json!("fallback")
    });
    assert_eq!(out, json!("fallback"));
    assert_eq!(seen.into_inner(), vec!["[0]", "[2]"]);
}

#[test]
fn array_drops_members_that_produce_no_value() {
    let member = constructor(&nominal(Primitive::String), coercions::empty_to_undefined());
    assert_eq!(array_of(&member).call_unsafe(json!(["", "x"])), Ok(json!(["x"])));
}

#[test]
fn lax_strips_constraints_from_array_members() {
    let t = array_of(&positive_integer()).constructor(coercions::to_array());
    let lax = t.lax();

    assert_eq!(lax.member(), Some(&coercible::integer()));
    assert_ne!(t.member(), lax.member());
    assert_eq!(
        lax.member().and_then(Type::wrapped),
        Some(&nominal(Primitive::Integer))
    );
    assert_eq!(lax.call_unsafe(json!(["-3", "y"])), Ok(json!([-3, "y"])));
    assert_eq!(lax.call_unsafe(json!("4")), Ok(json!([4])));
}

#[test]
fn lax_strips_constraints_from_schema_members() {
    let t = hash_schema([("n", positive_integer())]);
    let lax = t.lax();

    let keys = lax.schema_keys().unwrap();
    assert_eq!(keys["n"].type_(), &coercible::integer());
    assert!(t.call_unsafe(json!({"n": "-1"})).is_err());
    assert_eq!(lax.call_unsafe(json!({"n": "-1"})), Ok(json!({"n": -1})));
}

#[test]
fn sum_types_compare_by_branch_order() {
    let a = strict::string();
    let b = strict::integer();
    assert_ne!(sum(&a, &b), sum(&b, &a));
    assert_eq!(sum(&a, &b), &a | &b);
}

#[test]
fn sum_error_references_both_branches() {
    let err = (strict::string() | strict::integer())
        .call_unsafe(json!(1.5))
        .unwrap_err();
    let TypeError::Sum { left, right } = err else {
        panic!("expected a sum error");
    };
    assert!(left.is_constraint_error());
    assert!(right.is_constraint_error());
}

#[test]
fn nested_schema_failures_are_attributed() {
    let address = hash_schema([
        ("street", constrained(&strict::string(), [Predicate::Filled]).unwrap()),
        (
            "zip",
            constrained(&strict::string(), [Predicate::format(r"^\d{5}$").unwrap()]).unwrap(),
        ),
    ]);
    let person = hash_schema([
        ("name", strict::string()),
        ("age", params::integer()),
        ("address", address),
        ("nickname?", strict::string()),
    ]);

    let input = json!({
        "name": "Ada",
        "age": "36",
        "address": {"street": "", "zip": "1234"},
    });
    let failure = person.try_call(input).unwrap_err();
    assert_eq!(
        failure.to_string(),
        "address: street: \"\" violates constraints (filled?(\"\") failed), \
         zip: \"1234\" violates constraints (format?(\"^\\\\d{5}$\", \"1234\") failed)"
    );
    assert_eq!(failure.input["age"], json!(36));
    assert_eq!(failure.error.failure_count(), 2);
}

#[test]
fn strict_schema_rejects_unknown_keys() {
    let t = hash_schema([("id", strict::integer())]).strict();
    let err = t.call_unsafe(json!({"id": 1, "x": 0, "y": 0})).unwrap_err();
    assert_eq!(err.to_string(), "x: x is not allowed, y: y is not allowed");
    assert_eq!(
        t.to_ast(),
        hash_schema([("id", strict::integer())])
            .with_unknown_keys(UnknownKeys::Reject)
            .to_ast()
    );
}

#[test]
fn map_validates_keys_and_values() {
    let t = map(
        &constrained(&strict::string(), [Predicate::format("^[a-z]+$").unwrap()]).unwrap(),
        &coercible::float(),
    );
    assert_eq!(
        t.call_unsafe(json!({"pi": "3.5", "e": 2})),
        Ok(json!({"pi": 3.5, "e": 2.0}))
    );
    let err = t.call_unsafe(json!({"Pi": 3})).unwrap_err();
    assert_eq!(err.member_failures()[0].at, Segment::Key("Pi".to_string()));
}

#[test]
fn ast_serializes_in_composition_order() {
    let t = positive_integer()
        .default(json!(1))
        .unwrap()
        .with_meta("doc", json!("page number"));
    assert_eq!(t.to_ast().spine(), vec!["default", "constructor", "constrained", "nominal"]);

    let ast = t.to_ast_with_meta();
    let encoded = serde_json::to_value(&ast).unwrap();
    assert_eq!(encoded["tag"], json!("annotated"));
    assert_eq!(encoded["meta"], json!({"doc": "page number"}));
    assert_eq!(encoded["node"]["tag"], json!("default"));

    let decoded: Ast = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, ast);
}

#[test]
fn maybe_wraps_optional_values() {
    let t = coercible::integer().maybe();
    assert_eq!(t.call(None), Ok(None));
    assert_eq!(t.call(Some(json!("7"))), Ok(Some(json!(7))));
}
