// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Integration tests for relation type indexes
//!
//! Covers index name decoding, the build lifecycle, index selection for
//! finalized queries and schema persistence through the storage drivers.

#[path = "testutils/mod.rs"]
mod testutils;

use graphcore::schema::decode_index_name;
use graphcore::storage::StorageTree;
use graphcore::{
    select_relation_index, CoreConfig, DataType, Direction, QueryError, RelationType,
    RelationTypeIndex, SchemaError, SchemaInspector, SchemaRegistry, SchemaStatus, SortOrder,
    VertexCentricQuery,
};
use std::sync::Arc;
use testutils::test_fixture::TestFixture;

fn enable(schema: &SchemaRegistry, index: RelationTypeIndex) -> RelationTypeIndex {
    let index = schema
        .update_index_status(&index, SchemaStatus::Registered)
        .expect("Failed to register index");
    schema
        .update_index_status(&index, SchemaStatus::Enabled)
        .expect("Failed to enable index")
}

#[test]
fn test_decode_index_names() {
    assert_eq!(decode_index_name("age:by_value").unwrap(), "by_value");
    assert_eq!(decode_index_name("a:b:c").unwrap(), "c");
    for bad in ["age", ":age", "age:", ""] {
        assert!(
            matches!(decode_index_name(bad), Err(SchemaError::InvalidIndexName(_))),
            "'{}' should not decode",
            bad
        );
    }
}

#[test]
fn test_index_lifecycle() {
    let fixture = TestFixture::new();
    let schema = fixture.schema();

    let index = schema
        .build_relation_index("knows", "by_age", Direction::Out, &["age"], SortOrder::Asc)
        .unwrap();
    assert_eq!(index.status(), SchemaStatus::Installed);
    assert_eq!(index.name().unwrap(), "by_age");
    assert_eq!(index.direction().unwrap(), Direction::Out);
    assert_eq!(index.base_type(schema.as_ref()).unwrap().name(), "knows");
    assert_eq!(index.to_string(), "by_age");

    // skipping a step is rejected
    assert!(matches!(
        schema.update_index_status(&index, SchemaStatus::Enabled),
        Err(SchemaError::InvalidStatusTransition { .. })
    ));

    let enabled = enable(schema, index.clone());
    assert_eq!(enabled.status(), SchemaStatus::Enabled);
    // the earlier view is a snapshot; identity is unchanged
    assert_eq!(index.status(), SchemaStatus::Installed);
    assert_eq!(index, enabled);

    let disabled = schema
        .update_index_status(&enabled, SchemaStatus::Disabled)
        .unwrap();
    assert_eq!(disabled.status(), SchemaStatus::Disabled);
    assert!(schema
        .update_index_status(&disabled, SchemaStatus::Enabled)
        .is_err());

    let looked_up = schema.relation_index("knows", "by_age").unwrap();
    assert_eq!(looked_up.status(), SchemaStatus::Disabled);
}

#[test]
fn test_index_types_do_not_resolve_by_name() {
    let fixture = TestFixture::new();
    let schema = fixture.schema();
    schema
        .build_relation_index("age", "by_value", Direction::Both, &[], SortOrder::Asc)
        .unwrap();

    assert!(!schema.contains_relation_type("age:by_value"));
    assert_eq!(schema.relation_indexes("age").len(), 1);
    assert!(schema.relation_indexes("name").is_empty());
}

#[test]
fn test_invalid_index_definitions() {
    let fixture = TestFixture::new();
    let schema = fixture.schema();

    assert!(matches!(
        schema.build_relation_index("missing", "idx", Direction::Both, &[], SortOrder::Asc),
        Err(SchemaError::NotFound(_))
    ));
    assert!(matches!(
        schema.build_relation_index("knows", "a:b", Direction::Both, &[], SortOrder::Asc),
        Err(SchemaError::InvalidIndexName(_))
    ));
    assert!(matches!(
        schema.build_relation_index("knows", "idx", Direction::In, &[], SortOrder::Asc),
        Err(SchemaError::InvalidDefinition(_))
    ));
    assert!(matches!(
        schema.build_relation_index("knows", "idx", Direction::Both, &["blob"], SortOrder::Asc),
        Err(SchemaError::InvalidDefinition(_))
    ));
    assert!(matches!(
        schema.build_relation_index(
            "knows",
            "idx",
            Direction::Both,
            &["age", "age"],
            SortOrder::Asc
        ),
        Err(SchemaError::InvalidDefinition(_))
    ));

    schema
        .build_relation_index("knows", "idx", Direction::Both, &["age"], SortOrder::Asc)
        .unwrap();
    assert!(matches!(
        schema.build_relation_index("knows", "idx", Direction::Both, &["name"], SortOrder::Asc),
        Err(SchemaError::AlreadyExists(_))
    ));
}

#[test]
fn test_corrupt_direction_flags() {
    let fixture = TestFixture::new();
    let knows = fixture.schema().relation_type("knows").unwrap();

    let mut broken = RelationType::edge_label(4000, "knows:broken");
    broken.base_type = Some(knows.id);
    broken.direction_flags = 0b11;
    let index = RelationTypeIndex::new(Arc::new(broken)).unwrap();

    assert!(matches!(
        index.direction(),
        Err(SchemaError::CorruptSchemaState(_))
    ));

    let query = fixture
        .builder()
        .labels(&["knows"])
        .unwrap()
        .build();
    let result = select_relation_index(&query, &[index], fixture.schema().as_ref());
    assert!(matches!(
        result,
        Err(QueryError::Schema(SchemaError::CorruptSchemaState(_)))
    ));
}

#[test]
fn test_select_relation_index() {
    let fixture = TestFixture::new();
    let schema = fixture.schema();

    let by_age = schema
        .build_relation_index("knows", "by_age", Direction::Out, &["age"], SortOrder::Asc)
        .unwrap();
    let by_age_name = schema
        .build_relation_index(
            "knows",
            "by_age_name",
            Direction::Both,
            &["age", "name"],
            SortOrder::Asc,
        )
        .unwrap();
    let by_name_desc = schema
        .build_relation_index("knows", "by_name_desc", Direction::Both, &["name"], SortOrder::Desc)
        .unwrap();
    let installed_only = schema
        .build_relation_index("knows", "pending", Direction::Both, &["weight"], SortOrder::Asc)
        .unwrap();

    let candidates = vec![
        enable(schema, by_age),
        enable(schema, by_age_name),
        enable(schema, by_name_desc),
        installed_only,
    ];
    let select = |query: VertexCentricQuery| {
        select_relation_index(&query, &candidates, schema.as_ref())
            .unwrap()
            .map(|index| index.name().unwrap().to_string())
    };

    // equal coverage; the first candidate wins
    let query = fixture
        .builder()
        .direction(Direction::Out)
        .labels(&["knows"])
        .unwrap()
        .has("age", 30)
        .unwrap()
        .build();
    assert_eq!(select(query).as_deref(), Some("by_age"));

    // a longer covered prefix wins
    let query = fixture
        .builder()
        .direction(Direction::Out)
        .labels(&["knows"])
        .unwrap()
        .has("age", 30)
        .unwrap()
        .has("name", "bob")
        .unwrap()
        .build();
    assert_eq!(select(query).as_deref(), Some("by_age_name"));

    // an OUT-only index does not cover BOTH
    let query = fixture
        .builder()
        .labels(&["knows"])
        .unwrap()
        .has("age", 30)
        .unwrap()
        .build();
    assert_eq!(select(query).as_deref(), Some("by_age_name"));

    // ordering must match the leading sort key and its order
    let query = fixture
        .builder()
        .labels(&["knows"])
        .unwrap()
        .order_by("name", SortOrder::Desc)
        .unwrap()
        .build();
    assert_eq!(select(query).as_deref(), Some("by_name_desc"));

    let query = fixture
        .builder()
        .labels(&["knows"])
        .unwrap()
        .order_by("name", SortOrder::Asc)
        .unwrap()
        .build();
    assert_eq!(select(query), None);

    // only enabled indexes are used
    let query = fixture
        .builder()
        .labels(&["knows"])
        .unwrap()
        .has("weight", 1.5)
        .unwrap()
        .order_by("weight", SortOrder::Asc)
        .unwrap()
        .build();
    assert_eq!(select(query), None);

    // no single resolved type, no index
    let query = fixture.builder().has("age", 30).unwrap().build();
    assert_eq!(select(query), None);
    let query = fixture.builder().labels(&["age"]).unwrap().build();
    assert_eq!(select(query), None);
}

#[test]
fn test_persist_and_load_in_memory() {
    let fixture = TestFixture::new();
    let schema = fixture.schema();
    let index = schema
        .build_relation_index("knows", "by_age", Direction::In, &["age"], SortOrder::Desc)
        .unwrap();
    enable(schema, index);

    let driver = CoreConfig::default().open_storage().unwrap();
    let tree = driver.open_tree("schema").unwrap();
    let written = schema.persist(&tree).unwrap();
    assert_eq!(written, schema.len());

    let loaded = SchemaRegistry::load(&tree).unwrap();
    assert_eq!(loaded.len(), schema.len());
    let index = loaded.relation_index("knows", "by_age").unwrap();
    assert_eq!(index.status(), SchemaStatus::Enabled);
    assert_eq!(index.direction().unwrap(), Direction::In);
    assert_eq!(index.sort_order(), SortOrder::Desc);
    let sort_key = index.sort_key(&loaded).unwrap();
    assert_eq!(sort_key.len(), 1);
    assert_eq!(sort_key[0].name(), "age");

    // new definitions do not reuse persisted identifiers
    let height = loaded
        .make_property_key("height", DataType::Float)
        .unwrap();
    assert!(height.id > index.wrapped_type().id);
    assert_eq!(loaded.relation_type_by_id(height.id).unwrap().name(), "height");
}

#[test]
fn test_load_rejects_corrupt_records() {
    let fixture = TestFixture::new();
    let driver = CoreConfig::default().open_storage().unwrap();
    let tree = driver.open_tree("schema").unwrap();
    fixture.schema().persist(&tree).unwrap();

    let first = tree.iter().unwrap().next().unwrap().unwrap();
    let (key, mut value) = first;
    let last = value.len() - 1;
    value[last] ^= 0xFF;
    tree.insert(&key, &value).unwrap();

    assert!(matches!(
        SchemaRegistry::load(&tree),
        Err(SchemaError::CorruptSchemaState(_))
    ));

    tree.insert(&key, &[1, 2]).unwrap();
    assert!(matches!(
        SchemaRegistry::load(&tree),
        Err(SchemaError::CorruptSchemaState(_))
    ));
}

#[test]
#[serial_test::serial]
fn test_persist_and_reload_with_sled() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = CoreConfig::sled(temp_dir.path().join("graphcore_test"));

    {
        let fixture = TestFixture::new();
        let schema = fixture.schema();
        let index = schema
            .build_relation_index("knows", "by_name", Direction::Both, &["name"], SortOrder::Asc)
            .unwrap();
        schema
            .update_index_status(&index, SchemaStatus::Registered)
            .unwrap();

        let driver = config.open_storage().unwrap();
        let tree = driver.open_tree(&config.schema_tree).unwrap();
        schema.persist(&tree).unwrap();
        driver.flush().unwrap();
    }

    let driver = config.open_storage().unwrap();
    assert!(driver
        .list_trees()
        .unwrap()
        .contains(&config.schema_tree));
    let tree = driver.open_tree(&config.schema_tree).unwrap();
    let loaded = SchemaRegistry::load(&tree).unwrap();

    assert!(loaded.contains_property_key("age"));
    assert!(loaded.contains_relation_type("knows"));
    let index = loaded.relation_index("knows", "by_name").unwrap();
    assert_eq!(index.status(), SchemaStatus::Registered);
}
