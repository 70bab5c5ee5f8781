// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Vertex-centric query construction
//!
//! This module provides:
//! - Comparison predicates and constraints
//! - The validating query builder and the immutable query it produces
//! - Relation type index selection for a finalized query

pub mod builder;
pub mod descriptor;
pub mod index_selection;
pub mod predicate;

pub use builder::VertexCentricQueryBuilder;
pub use descriptor::{OrderEntry, VertexCentricQuery};
pub use index_selection::select_relation_index;
pub use predicate::{Cmp, PredicateCondition};

use crate::graph::GraphError;
use crate::schema::SchemaError;
use thiserror::Error;

/// Errors raised while configuring or planning a vertex-centric query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl From<GraphError> for QueryError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::VertexNotFound(_) => QueryError::NotFound(err.to_string()),
            GraphError::InvalidRelationId(_) => QueryError::InvalidArgument(err.to_string()),
        }
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
