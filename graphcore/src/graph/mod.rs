// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph element references
//!
//! The core never owns vertices or relations. It only needs stable
//! references to them (for adjacency constraints and identifier rewrites)
//! and a lookup that turns a numeric identifier into a vertex reference.

pub mod element;
pub mod lookup;

pub use element::{Element, RelationIdentifier, VertexId, VertexRef};
pub use lookup::{InMemoryVertices, VertexLookup};

use thiserror::Error;

/// Error types for element references and lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex not found: {0}")]
    VertexNotFound(VertexId),

    #[error("Invalid relation identifier: {0}")]
    InvalidRelationId(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
