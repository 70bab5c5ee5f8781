// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Schema module - relation types, implicit keys and relation type indexes
//
// Relation types are the only schema records. Indexes over a relation type
// are relation types themselves, identified through a mangled name that only
// the `index` module encodes and decodes.

pub mod implicit;
pub mod index;
pub mod inspector;
pub mod registry;
pub mod types;

pub use implicit::ImplicitKey;
pub use index::{
    decode_index_name, encode_index_type_name, RelationTypeIndex, RELATION_INDEX_SEPARATOR,
};
pub use inspector::SchemaInspector;
pub use registry::SchemaRegistry;
pub use types::{
    DataType, Direction, RelationCategory, RelationKind, RelationType, RelationTypeId,
    SchemaStatus, SortOrder,
};

use crate::storage::StorageDriverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid index name encountered: {0}")]
    InvalidIndexName(String),

    #[error("Relation type {0} cannot be resolved in this schema")]
    UnresolvedType(RelationTypeId),

    /// Schema storage holds data no valid schema operation could have written
    #[error("Corrupt schema state: {0}")]
    CorruptSchemaState(String),

    #[error("Relation type not found: {0}")]
    NotFound(String),

    #[error("Relation type already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(String),

    #[error("Invalid index status transition: {from} -> {to}")]
    InvalidStatusTransition { from: SchemaStatus, to: SchemaStatus },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageDriverError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
