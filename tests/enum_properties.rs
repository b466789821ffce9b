use cim_types::builder::{enum_type, nominal};
use cim_types::{DefinitionError, Primitive, TypeKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn labels_and_raw() -> impl Strategy<Value = Vec<(String, i64)>> {
    (
        proptest::collection::btree_set("[a-z]{1,5}", 1..6),
        proptest::collection::btree_set(0i64..1000, 6..7),
    )
        .prop_map(|(labels, raws)| labels.into_iter().zip(raws).collect())
}

proptest! {
    #[test]
    fn valid_enum_maps_labels_and_raw_values(pairs in labels_and_raw()) {
        let mapping: Vec<(Value, Value)> =
            pairs.iter().map(|(l, r)| (json!(l), json!(r))).collect();
        let t = enum_type(&nominal(Primitive::String), mapping.clone()).unwrap();
        let TypeKind::Enum(e) = t.kind() else {
            panic!("expected an enum");
        };
        for (label, raw) in &mapping {
            prop_assert_eq!(&e.map_value(label.clone()), label);
            prop_assert_eq!(&e.map_value(raw.clone()), label);
            prop_assert_eq!(t.call_unsafe(raw.clone()), Ok(label.clone()));
        }
        let outsider = json!(-1);
        prop_assert_eq!(e.map_value(outsider.clone()), outsider.clone());
        prop_assert!(!t.is_valid(&outsider));
    }

    #[test]
    fn shared_raw_value_is_a_definition_error(pairs in labels_and_raw(), dup in 1usize..6) {
        prop_assume!(pairs.len() >= 2);
        let dup = dup % pairs.len();
        let mut mapping: Vec<(Value, Value)> =
            pairs.iter().map(|(l, r)| (json!(l), json!(r))).collect();
        let taken = mapping[0].1.clone();
        let target = if dup == 0 { 1 } else { dup };
        mapping[target].1 = taken;
        let err = enum_type(&nominal(Primitive::String), mapping).unwrap_err();
        let is_non_bijective = matches!(err, DefinitionError::NonBijectiveEnum { .. });
        prop_assert!(is_non_bijective);
    }

    #[test]
    fn default_after_enum_is_always_rejected(v in any::<i64>()) {
        let t = nominal(Primitive::String).enumeration([json!("a"), json!("b")]).unwrap();
        prop_assert_eq!(t.default(json!(v)).unwrap_err(), DefinitionError::DefaultAfterEnum);
        prop_assert_eq!(t.default(json!("a")).unwrap_err(), DefinitionError::DefaultAfterEnum);
    }
}

#[test]
fn default_before_enum_is_supported() {
    let t = nominal(Primitive::String)
        .default(json!("draft"))
        .unwrap()
        .enumeration([json!("draft"), json!("published")])
        .unwrap();
    assert_eq!(t.call_undefined(), Ok(Some(json!("draft"))));
    assert_eq!(
        t.enum_values(),
        Some(vec![&json!("draft"), &json!("published")])
    );
    assert!(t.includes(&json!("published")));
    assert!(!t.includes(&json!("archived")));
}

#[test]
fn default_outside_the_labels_is_rejected() {
    let err = nominal(Primitive::String)
        .default(json!("archived"))
        .unwrap()
        .enumeration([json!("draft"), json!("published")])
        .unwrap_err();
    assert!(matches!(err, DefinitionError::InvalidDefault { .. }));
    assert!(err.to_string().starts_with("default value \"archived\" violates constraints"));
}

#[test]
fn default_after_enum_message_explains_the_order() {
    let t = nominal(Primitive::Integer).enumeration([json!(1)]).unwrap();
    let message = t.default(json!(1)).unwrap_err().to_string();
    assert!(message.contains(".default(value).enum(values)"));
}

#[test]
fn labels_must_be_unique() {
    let mapping = [(json!("x"), json!(1)), (json!("x"), json!(2))];
    assert_eq!(
        enum_type(&nominal(Primitive::String), mapping).unwrap_err(),
        DefinitionError::DuplicateEnumLabel(json!("x"))
    );
}
