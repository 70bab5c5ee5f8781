// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Vertex lookup by numeric identifier

use super::element::{VertexId, VertexRef};
use super::{GraphError, GraphResult};
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// Resolves vertex identifiers to references.
///
/// Implemented by the transaction layer that owns vertex lifecycle.
pub trait VertexLookup: Send + Sync {
    /// Fails with [`GraphError::VertexNotFound`] when the vertex is absent
    fn vertex(&self, id: VertexId) -> GraphResult<VertexRef>;
}

/// Vertex set kept in memory
#[derive(Debug, Default)]
pub struct InMemoryVertices {
    ids: RwLock<BTreeSet<VertexId>>,
}

impl InMemoryVertices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I: IntoIterator<Item = VertexId>>(ids: I) -> Self {
        Self {
            ids: RwLock::new(ids.into_iter().collect()),
        }
    }

    pub fn add(&self, id: VertexId) -> VertexRef {
        self.ids.write().insert(id);
        VertexRef::new(id)
    }

    pub fn remove(&self, id: VertexId) -> bool {
        self.ids.write().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }
}

impl VertexLookup for InMemoryVertices {
    fn vertex(&self, id: VertexId) -> GraphResult<VertexRef> {
        if self.ids.read().contains(&id) {
            Ok(VertexRef::new(id))
        } else {
            Err(GraphError::VertexNotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let vertices = InMemoryVertices::with_ids([4, 8]);
        assert_eq!(vertices.vertex(4).unwrap().id(), 4);
        assert_eq!(vertices.vertex(5), Err(GraphError::VertexNotFound(5)));

        vertices.add(5);
        assert!(vertices.vertex(5).is_ok());
        assert!(vertices.remove(4));
        assert_eq!(vertices.len(), 2);
    }
}
