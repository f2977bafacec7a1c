//! Property-based tests for envelope flattening and field selection

use lmsq::output::{flatten_list_response, flatten_resource, select_fields};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn attribute_map() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-z][a-z_]{0,11}", any::<i64>()), 0..12)
}

/// Flattening keeps every attribute and puts `id` and `type` first.
#[test]
fn test_flatten_resource_keeps_attributes() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[0-9]{1,8}", attribute_map()), |(id, attributes)| {
            let attrs: Map<String, Value> = attributes
                .iter()
                .map(|(k, v)| (k.clone(), json!(v)))
                .collect();
            let envelope = json!({
                "data": {"type": "orders", "id": id.clone(), "attributes": attrs.clone()}
            });

            let flat = flatten_resource(&envelope).unwrap();
            let keys: Vec<&String> = flat.keys().collect();
            prop_assert_eq!(keys[0].as_str(), "id");
            prop_assert_eq!(keys[1].as_str(), "type");
            prop_assert_eq!(&flat["id"], &json!(id));
            for (key, value) in &attrs {
                if key == "id" || key == "type" {
                    continue;
                }
                prop_assert_eq!(flat.get(key), Some(value));
            }
            Ok(())
        })
        .unwrap();
}

/// List order and pagination values are carried through untouched.
#[test]
fn test_flatten_list_preserves_order_and_meta() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec("[0-9]{1,6}", 0..20),
                1u64..1000,
                1u64..100,
                1u64..=100,
                0u64..100_000,
            ),
            |(ids, page, page_count, page_size, total)| {
                let data: Vec<Value> = ids
                    .iter()
                    .map(|id| json!({"type": "orders", "id": id, "attributes": {}}))
                    .collect();
                let envelope = json!({
                    "meta": {"page": {
                        "currentPage": page, "lastPage": page_count,
                        "perPage": page_size, "total": total
                    }},
                    "data": data
                });

                let list = flatten_list_response(&envelope).unwrap();
                let got: Vec<&str> = list
                    .data
                    .iter()
                    .map(|item| item["id"].as_str().unwrap())
                    .collect();
                let expected: Vec<&str> = ids.iter().map(String::as_str).collect();
                prop_assert_eq!(got, expected);
                prop_assert_eq!(list.meta.page, page);
                prop_assert_eq!(list.meta.page_count, page_count);
                prop_assert_eq!(list.meta.page_size, page_size);
                prop_assert_eq!(list.meta.total, total);
                Ok(())
            },
        )
        .unwrap();
}

/// Selecting any subset of existing fields yields `id` plus that subset, in request order.
#[test]
fn test_select_fields_subset() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(attribute_map(), prop::collection::vec(any::<prop::sample::Index>(), 0..6)),
            |(attributes, picks)| {
                let attrs: Map<String, Value> = attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), json!(v)))
                    .collect();
                let envelope = json!({"data": {"type": "x", "id": "1", "attributes": attrs}});
                let flat = flatten_resource(&envelope).unwrap();

                let keys: Vec<String> = flat.keys().cloned().collect();
                let mut requested: Vec<String> = Vec::new();
                for pick in &picks {
                    let key = pick.get(&keys).clone();
                    if key != "id" && !requested.contains(&key) {
                        requested.push(key);
                    }
                }

                let selected = select_fields(&flat, &requested).unwrap();
                let got: Vec<&String> = selected.keys().collect();
                prop_assert_eq!(got[0].as_str(), "id");
                prop_assert_eq!(got.len(), requested.len() + 1);
                for (got, want) in got[1..].iter().zip(&requested) {
                    prop_assert_eq!(*got, want);
                }
                Ok(())
            },
        )
        .unwrap();
}
