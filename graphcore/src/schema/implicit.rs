// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Implicit system keys
//
// Pseudo-properties with no physical storage. Their values are computed
// from the element reference itself, so queries on them must be answered
// directly instead of through relation type indexes.

use super::types::{DataType, RelationType, RelationTypeId};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Identifiers below this value are reserved for system types
pub const SYSTEM_ID_LIMIT: RelationTypeId = 1024;

/// Prefix reserved for system type names
pub const SYSTEM_NAME_PREFIX: char = '~';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImplicitKey {
    /// Structured identifier of this relation
    Id,
    /// Raw numeric identifier of this relation
    InternalId,
    /// Identifier of the vertex on the other end of an edge
    AdjacentId,
    /// Label of an edge
    Label,
    /// Key of a property
    Key,
    /// Value of a property
    Value,
}

impl ImplicitKey {
    pub const ALL: [ImplicitKey; 6] = [
        ImplicitKey::Id,
        ImplicitKey::InternalId,
        ImplicitKey::AdjacentId,
        ImplicitKey::Label,
        ImplicitKey::Key,
        ImplicitKey::Value,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ImplicitKey::Id => "id",
            ImplicitKey::InternalId => "~nid",
            ImplicitKey::AdjacentId => "~adjacent",
            ImplicitKey::Label => "label",
            ImplicitKey::Key => "~key",
            ImplicitKey::Value => "~value",
        }
    }

    pub fn id(&self) -> RelationTypeId {
        match self {
            ImplicitKey::Id => 1,
            ImplicitKey::InternalId => 2,
            ImplicitKey::AdjacentId => 3,
            ImplicitKey::Label => 4,
            ImplicitKey::Key => 5,
            ImplicitKey::Value => 6,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ImplicitKey::Id | ImplicitKey::Value => DataType::Object,
            ImplicitKey::InternalId | ImplicitKey::AdjacentId => DataType::Integer,
            ImplicitKey::Label | ImplicitKey::Key => DataType::String,
        }
    }

    pub fn from_name(name: &str) -> Option<ImplicitKey> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }

    /// Shared schema entity for this key
    pub fn relation_type(&self) -> Arc<RelationType> {
        IMPLICIT_TYPES[*self as usize].clone()
    }
}

static IMPLICIT_TYPES: Lazy<Vec<Arc<RelationType>>> = Lazy::new(|| {
    ImplicitKey::ALL
        .iter()
        .map(|key| {
            let mut relation_type =
                RelationType::property_key(key.id(), key.name(), key.data_type());
            relation_type.system = true;
            relation_type.implicit = true;
            Arc::new(relation_type)
        })
        .collect()
});
