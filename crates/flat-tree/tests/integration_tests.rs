//! End-to-end tests across builder, projector, walkers and queries.
//!
//! The fixtures model a small category table the way it typically arrives
//! from a database: ids and parent ids, plus display fields.

use flat_tree::{
    build_select_options, build_tree, find_descendants, find_leaf_ids, find_node_by_id,
    find_parent_ids, find_parent_names, AncestorResolver, BuildConfig, FieldSchema, FlatRecord,
    LeafMode, TreeBuilder, TreeError, TreeQuery,
};
use flat_tree_model::{forest_iter, forest_to_value, SchemaViolation};
use serde_json::{json, Value};

fn records(value: Value) -> Vec<FlatRecord> {
    serde_json::from_value(value).unwrap()
}

/// ```text
/// Electronics(1)            Books(5)
///  ├── Phones(2)             └── Fiction(6)
///  │    └── Android(4)
///  └── Laptops(3)
/// ```
/// plus an orphan (7 -> 99).
fn catalog() -> Vec<FlatRecord> {
    records(json!([
        {"id": 1, "pid": 0, "name": "Electronics", "label": "Electronics", "value": "electronics"},
        {"id": 2, "pid": 1, "name": "Phones", "label": "Phones", "value": "phones"},
        {"id": 3, "pid": 1, "name": "Laptops", "label": "Laptops", "value": "laptops"},
        {"id": 4, "pid": 2, "name": "Android", "label": "Android", "value": "android"},
        {"id": 5, "pid": 0, "name": "Books", "label": "Books", "value": "books"},
        {"id": 6, "pid": 5, "name": "Fiction", "label": "Fiction", "value": "fiction"},
        {"id": 7, "pid": 99, "name": "Lost", "label": "Lost", "value": "lost"}
    ]))
}

// Worked examples

#[test]
fn test_example_build_tree() {
    let input = records(json!([
        {"id": 1, "pid": 0},
        {"id": 2, "pid": 1},
        {"id": 3, "pid": 1},
        {"id": 4, "pid": 2}
    ]));
    let schema = FieldSchema::default();
    let forest = build_tree(&input, &schema, &BuildConfig::default()).unwrap();

    assert_eq!(
        forest_to_value(&forest, "children"),
        json!([
            {"id": 1, "pid": 0, "children": [
                {"id": 2, "pid": 1, "children": [{"id": 4, "pid": 2, "children": []}]},
                {"id": 3, "pid": 1, "children": []}
            ]}
        ])
    );
}

#[test]
fn test_example_descendants() {
    let input = records(json!([
        {"id": 1, "pid": 0},
        {"id": 2, "pid": 1},
        {"id": 3, "pid": 1},
        {"id": 4, "pid": 2}
    ]));
    let schema = FieldSchema::default();
    assert_eq!(find_descendants(&input, 1, &schema).unwrap(), vec![2, 4, 3]);
}

#[test]
fn test_example_ancestors() {
    let input = records(json!([
        {"id": 1, "pid": 0, "name": "A"},
        {"id": 2, "pid": 1, "name": "B"},
        {"id": 3, "pid": 2, "name": "C"}
    ]));
    let schema = FieldSchema::default();

    assert_eq!(find_parent_ids(&input, 3, &schema).unwrap(), vec![1, 2, 3]);
    assert_eq!(
        find_parent_names(&input, 3, &schema).unwrap(),
        vec!["A", "B", "C"]
    );
    assert!(find_parent_ids(&input, 999, &schema).unwrap().is_empty());
}

#[test]
fn test_example_lone_orphan() {
    let input = records(json!([{"id": 2, "pid": 1}]));
    let schema = FieldSchema::default();
    assert!(build_tree(&input, &schema, &BuildConfig::default())
        .unwrap()
        .is_empty());
}

#[test]
fn test_example_leaf_ids() {
    let forest = json!([
        {"id": 1, "children": [
            {"id": 2, "children": []},
            {"id": 3, "children": [{"id": 6, "children": []}]}
        ]}
    ]);
    let schema = FieldSchema::default();
    let nodes = forest.as_array().unwrap();

    for mode in [LeafMode::Strict, LeafMode::Lenient] {
        assert_eq!(find_leaf_ids(nodes, &schema, mode).unwrap(), vec![2, 6]);
    }
}

// Builder output feeding the query layer

#[test]
fn test_catalog_forest_shape() {
    let schema = FieldSchema::default();
    let forest = build_tree(&catalog(), &schema, &BuildConfig::default()).unwrap();

    let ids: Vec<_> = forest_iter(&forest)
        .filter_map(|node| node.identifier("id"))
        .collect();
    assert_eq!(ids, vec![1, 2, 4, 3, 5, 6]);
}

#[test]
fn test_typed_and_json_forests_agree() {
    let schema = FieldSchema::default();
    let forest = build_tree(&catalog(), &schema, &BuildConfig::default()).unwrap();
    let rendered = forest_to_value(&forest, &schema.children_field);
    let json_nodes = rendered.as_array().unwrap();

    for mode in [LeafMode::Strict, LeafMode::Lenient] {
        let typed = find_leaf_ids(&forest, &schema, mode).unwrap();
        let untyped = find_leaf_ids(json_nodes, &schema, mode).unwrap();
        assert_eq!(typed, vec![4, 3, 6]);
        assert_eq!(typed, untyped);
    }

    let typed = find_node_by_id(&forest, 2, &schema).unwrap();
    let untyped = find_node_by_id(json_nodes, 2, &schema).unwrap();
    assert_eq!(typed.to_value(&schema.children_field), *untyped);
}

#[test]
fn test_leaves_without_explicit_children() {
    let schema = FieldSchema::default();
    let config = BuildConfig::builder()
        .with_always_emit_children(false)
        .build();
    let forest = build_tree(&catalog(), &schema, &config).unwrap();

    let leaves = TreeQuery::new(&schema)
        .with_mode(LeafMode::Strict)
        .leaf_ids(&forest)
        .unwrap();
    assert_eq!(leaves, vec![4, 3, 6]);
}

#[test]
fn test_find_node_keeps_subtree() {
    let schema = FieldSchema::default();
    let forest = build_tree(&catalog(), &schema, &BuildConfig::default()).unwrap();

    let phones = find_node_by_id(&forest, 2, &schema).unwrap();
    assert_eq!(phones.record["name"], json!("Phones"));
    assert_eq!(phones.children().len(), 1);
    assert_eq!(phones.children()[0].record["name"], json!("Android"));

    assert!(find_node_by_id(&forest, 7, &schema).is_none());
}

#[test]
fn test_select_options_for_catalog() {
    let schema = FieldSchema::default();
    let options = build_select_options(&catalog(), &schema, 0).unwrap();

    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!([
            {"label": "Electronics", "value": "electronics", "children": [
                {"label": "Phones", "value": "phones", "children": [
                    {"label": "Android", "value": "android"}
                ]},
                {"label": "Laptops", "value": "laptops"}
            ]},
            {"label": "Books", "value": "books", "children": [
                {"label": "Fiction", "value": "fiction"}
            ]}
        ])
    );
}

#[test]
fn test_select_options_match_tree_shape() {
    let schema = FieldSchema::default();
    let forest = build_tree(&catalog(), &schema, &BuildConfig::default()).unwrap();
    let options = build_select_options(&catalog(), &schema, 0).unwrap();

    assert_eq!(options.len(), forest.len());
    for (option, node) in options.iter().zip(&forest) {
        assert_eq!(option.label, node.record["label"]);
        assert_eq!(option.children.len(), node.children().len());
    }
}

#[test]
fn test_ancestor_path_presentation() {
    let schema = FieldSchema::default();
    let path = AncestorResolver::new(&schema).resolve(&catalog(), 4).unwrap();

    assert_eq!(path.joined_ids(), "1,2,4");
    assert_eq!(path.joined_names(), "Electronics-Phones-Android");
}

#[test]
fn test_orphan_still_resolves_upward() {
    // The orphan is absent from trees but its own chain is still walkable.
    let schema = FieldSchema::default();
    assert_eq!(find_parent_ids(&catalog(), 7, &schema).unwrap(), vec![7]);
}

#[test]
fn test_descendants_of_every_root() {
    let schema = FieldSchema::default();
    assert_eq!(find_descendants(&catalog(), 1, &schema).unwrap(), vec![2, 4, 3]);
    assert_eq!(find_descendants(&catalog(), 5, &schema).unwrap(), vec![6]);
    assert_eq!(find_descendants(&catalog(), 99, &schema).unwrap(), vec![7]);
}

// Errors

#[test]
fn test_schema_violation_aborts_whole_build() {
    let mut input = catalog();
    input.push(records(json!([{"id": 8}])).remove(0));
    let schema = FieldSchema::default();

    let err = build_tree(&input, &schema, &BuildConfig::default()).unwrap_err();
    assert_eq!(
        err,
        TreeError::SchemaViolation(SchemaViolation::MissingField {
            index: 7,
            field: "pid".to_string(),
        })
    );
}

#[test]
fn test_invalid_identifier_rejected() {
    let input = records(json!([{"id": "one", "pid": 0}]));
    let schema = FieldSchema::default();

    let err = build_tree(&input, &schema, &BuildConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        TreeError::SchemaViolation(SchemaViolation::InvalidIdentifier { index: 0, .. })
    ));
}

#[test]
fn test_cycles_fail_every_walker() {
    let input = records(json!([
        {"id": 1, "pid": 0},
        {"id": 2, "pid": 3},
        {"id": 3, "pid": 2}
    ]));
    let schema = FieldSchema::default();

    assert!(matches!(
        find_parent_ids(&input, 2, &schema),
        Err(TreeError::CycleDetected { .. })
    ));
    assert!(matches!(
        find_descendants(&input, 2, &schema),
        Err(TreeError::CycleDetected { .. })
    ));
    // No root reaches the loop, yet both builders still reject it.
    assert_eq!(
        build_tree(&input, &schema, &BuildConfig::default()).unwrap_err(),
        TreeError::CycleDetected { id: 2 }
    );
    assert_eq!(
        build_select_options(&input, &schema, 0).unwrap_err(),
        TreeError::CycleDetected { id: 2 }
    );
}

#[test]
fn test_builder_reusable_across_inputs() {
    let schema = FieldSchema::default();
    let builder = TreeBuilder::new(&schema);

    let first = builder.build(&catalog()).unwrap();
    let second = builder.build(&records(json!([{"id": 1, "pid": 0}]))).unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
    assert_eq!(builder.build(&catalog()).unwrap(), first);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_build_matches_sequential() {
    let schema = FieldSchema::default();
    let sequential = build_tree(&catalog(), &schema, &BuildConfig::default()).unwrap();
    let parallel = build_tree(
        &catalog(),
        &schema,
        &BuildConfig::builder().with_parallel(true).build(),
    )
    .unwrap();
    assert_eq!(sequential, parallel);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_build_reports_first_cycle() {
    let input = records(json!([
        {"id": 1, "pid": 0},
        {"id": 2, "pid": 1},
        {"id": 1, "pid": 2},
        {"id": 5, "pid": 0},
        {"id": 6, "pid": 5},
        {"id": 5, "pid": 6}
    ]));
    let schema = FieldSchema::default();
    let err = build_tree(
        &input,
        &schema,
        &BuildConfig::builder().with_parallel(true).build(),
    )
    .unwrap_err();
    assert_eq!(err, TreeError::CycleDetected { id: 1 });
}
