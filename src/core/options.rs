use serde_json::{Map, Value};

/// Recursive option tree: option name → scalar, nested tree or list of trees.
pub type OptionsTree = Map<String, Value>;

/// Deep-merges `overrides` into a copy of `base`.
///
/// For every key in `overrides`:
/// - a list is a broadcast template: its first element is merged into every
///   element of the list `base` holds at that key (extra override elements are
///   ignored, an empty override list is a no-op);
/// - a mapping is merged recursively, creating an empty mapping in `base` when
///   the key is missing or holds a non-mapping value;
/// - anything else (including `null`) replaces the base value.
///
/// Keys only present in `base` are kept as-is. Neither input is mutated.
#[must_use]
pub fn merge_options(base: &OptionsTree, overrides: &OptionsTree) -> OptionsTree {
    let mut merged = base.clone();
    merge_into(&mut merged, overrides);
    merged
}

fn merge_into(target: &mut OptionsTree, overrides: &OptionsTree) {
    for (key, override_value) in overrides {
        match override_value {
            Value::Array(templates) => {
                let Some(Value::Object(template)) = templates.first() else {
                    continue;
                };
                if let Some(Value::Array(elements)) = target.get_mut(key) {
                    for element in elements.iter_mut() {
                        if let Value::Object(element) = element {
                            merge_into(element, template);
                        }
                    }
                }
            }
            Value::Object(nested) => {
                let slot = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(slot) = slot {
                    merge_into(slot, nested);
                }
            }
            scalar => {
                target.insert(key.clone(), scalar.clone());
            }
        }
    }
}

/// Reads `tree[path[0]][path[1]]...`.
#[must_use]
pub fn option_at<'a>(tree: &'a OptionsTree, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(tree.get(*first)?, |value, key| value.as_object()?.get(*key))
}

/// Writes `value` at `path`, creating (or replacing non-mapping) intermediate nodes.
pub fn set_option(tree: &mut OptionsTree, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut node = tree;
    for key in parents {
        let slot = node
            .entry((*key).to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        node = map;
    }
    node.insert((*last).to_owned(), value);
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{OptionsTree, merge_options, option_at, set_option};

    fn tree(value: Value) -> OptionsTree {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn scalar_override_wins() {
        let merged = merge_options(&tree(json!({"a": 1})), &tree(json!({"a": 2})));
        assert_eq!(merged["a"], json!(2));
    }

    #[test]
    fn nested_merge_keeps_untouched_keys() {
        let merged = merge_options(
            &tree(json!({"a": {"x": 1, "y": 2}})),
            &tree(json!({"a": {"y": 3}})),
        );
        assert_eq!(Value::Object(merged), json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn array_template_is_broadcast_to_every_element() {
        let merged = merge_options(
            &tree(json!({"a": [{"x": 1}, {"x": 1}]})),
            &tree(json!({"a": [{"x": 9}]})),
        );
        assert_eq!(Value::Object(merged), json!({"a": [{"x": 9}, {"x": 9}]}));
    }

    #[test]
    fn only_first_template_element_is_used() {
        let merged = merge_options(
            &tree(json!({"axes": [{"x": 1, "keep": true}, {"x": 2}]})),
            &tree(json!({"axes": [{"x": 7}, {"x": 8, "extra": 1}]})),
        );
        assert_eq!(
            Value::Object(merged),
            json!({"axes": [{"x": 7, "keep": true}, {"x": 7}]})
        );
    }

    #[test]
    fn array_override_without_base_array_is_ignored() {
        let base = tree(json!({"b": 1}));
        let merged = merge_options(&base, &tree(json!({"a": [{"x": 9}], "c": []})));
        assert_eq!(merged, base);
    }

    #[test]
    fn mapping_override_creates_missing_and_replaces_scalar_nodes() {
        let merged = merge_options(
            &tree(json!({"legend": false})),
            &tree(json!({"legend": {"display": true}, "title": {"text": "t"}})),
        );
        assert_eq!(
            Value::Object(merged),
            json!({"legend": {"display": true}, "title": {"text": "t"}})
        );
    }

    #[test]
    fn null_override_is_a_scalar() {
        let merged = merge_options(&tree(json!({"a": {"x": 1}})), &tree(json!({"a": null})));
        assert_eq!(merged["a"], Value::Null);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let base = tree(json!({"scales": {"y": [{"ticks": {"min": 0}}]}, "a": 1}));
        let overrides = tree(json!({"scales": {"y": [{"ticks": {"max": 5}}]}, "a": 2}));
        let base_before = base.clone();
        let overrides_before = overrides.clone();

        let merged = merge_options(&base, &overrides);

        assert_eq!(base, base_before);
        assert_eq!(overrides, overrides_before);
        assert_eq!(
            option_at(&merged, &["scales", "y"]),
            Some(&json!([{"ticks": {"min": 0, "max": 5}}]))
        );
    }

    #[test]
    fn set_option_creates_intermediate_nodes() {
        let mut options = tree(json!({"legend": "off"}));
        set_option(&mut options, &["legend", "display"], json!(false));
        assert_eq!(option_at(&options, &["legend", "display"]), Some(&json!(false)));
    }
}
