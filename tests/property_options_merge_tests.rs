use chart_bind::core::{OptionsTree, merge_options};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_owned()),
        Just("b".to_owned()),
        Just("c".to_owned()),
        Just("scales".to_owned()),
        Just("ticks".to_owned()),
    ]
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000i64..1_000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::btree_map(key_strategy(), inner.clone(), 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
            prop::collection::vec(
                prop::collection::btree_map(key_strategy(), inner, 0..3)
                    .prop_map(|map| Value::Object(map.into_iter().collect::<Map<_, _>>())),
                0..3
            )
            .prop_map(Value::Array),
        ]
    })
}

fn tree_strategy() -> impl Strategy<Value = OptionsTree> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..4)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #[test]
    fn merge_never_mutates_inputs(base in tree_strategy(), overrides in tree_strategy()) {
        let base_before = base.clone();
        let overrides_before = overrides.clone();
        let _ = merge_options(&base, &overrides);
        prop_assert_eq!(base, base_before);
        prop_assert_eq!(overrides, overrides_before);
    }

    #[test]
    fn top_level_scalar_overrides_always_win(
        base in tree_strategy(),
        overrides in tree_strategy(),
    ) {
        let merged = merge_options(&base, &overrides);
        for (key, value) in &overrides {
            if !value.is_object() && !value.is_array() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    #[test]
    fn base_only_keys_survive(base in tree_strategy(), overrides in tree_strategy()) {
        let merged = merge_options(&base, &overrides);
        for (key, value) in &base {
            if !overrides.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    #[test]
    fn empty_override_is_identity(base in tree_strategy()) {
        prop_assert_eq!(merge_options(&base, &OptionsTree::new()), base);
    }
}
