// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GraphCore - vertex-centric queries over ordered key-value graph storage
//!
//! GraphCore is the query-construction and schema-indexing core of a graph
//! database that keeps its data in a sorted binary key-value store.
//!
//! # Features
//!
//! - **Vertex-centric queries**: Validating builder for direction, relation
//!   type, property and adjacency constraints, ordering and limits
//! - **Implicit keys**: Identifier pseudo-properties are rewritten before
//!   they reach index planning
//! - **Relation type indexes**: Index identity (direction, sort key, sort
//!   order, build status) decoded from internal relation types
//! - **Byte ordering**: Unsigned key order shared with the storage drivers
//!
//! # Usage
//!
//! ```ignore
//! let schema = Arc::new(SchemaRegistry::new());
//! schema.make_property_key("age", DataType::Integer)?;
//! schema.make_edge_label("knows")?;
//!
//! let query = VertexCentricQueryBuilder::new(schema, vertices)
//!     .direction(Direction::Out)
//!     .labels(&["knows"])?
//!     .interval("age", 18, 65)?
//!     .limit(10)?
//!     .build();
//! ```

pub mod config;
pub mod graph;
pub mod query;
pub mod schema;
pub mod storage;

pub use config::{ConfigError, CoreConfig};
pub use graph::{Element, InMemoryVertices, RelationIdentifier, VertexId, VertexLookup, VertexRef};
pub use query::{
    select_relation_index, Cmp, PredicateCondition, QueryError, QueryResult, VertexCentricQuery,
    VertexCentricQueryBuilder,
};
pub use schema::{
    DataType, Direction, ImplicitKey, RelationCategory, RelationType, RelationTypeIndex,
    SchemaError, SchemaInspector, SchemaRegistry, SchemaResult, SchemaStatus, SortOrder,
};
pub use storage::{ByteKey, KeyRange, Value};

/// GraphCore version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GraphCore crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
