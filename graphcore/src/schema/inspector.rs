// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Schema inspection interface consumed by the query builder and the index codec

use super::types::{RelationType, RelationTypeId};
use std::sync::Arc;

/// Read access to the relation types of a schema.
///
/// Lookups by name never return the storage form of relation type indexes;
/// those are only reachable by identifier.
pub trait SchemaInspector: Send + Sync {
    /// Resolve an edge label or property key by name
    fn relation_type(&self, name: &str) -> Option<Arc<RelationType>>;

    /// Resolve a relation type by identifier
    fn relation_type_by_id(&self, id: RelationTypeId) -> Option<Arc<RelationType>>;

    /// Resolve a property key by name; edge labels resolve to `None`
    fn property_key(&self, name: &str) -> Option<Arc<RelationType>> {
        self.relation_type(name).filter(|t| t.is_property_key())
    }

    fn contains_relation_type(&self, name: &str) -> bool {
        self.relation_type(name).is_some()
    }

    fn contains_property_key(&self, name: &str) -> bool {
        self.property_key(name).is_some()
    }
}
