// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// In-memory schema registry
//
// Owns the relation types of one graph: the implicit system keys, user
// defined edge labels and property keys, and the internal types backing
// relation type indexes. Can be persisted to and restored from any
// ordered storage tree.

use super::implicit::{ImplicitKey, SYSTEM_ID_LIMIT, SYSTEM_NAME_PREFIX};
use super::index::{encode_index_type_name, RelationTypeIndex, RELATION_INDEX_SEPARATOR};
use super::inspector::SchemaInspector;
use super::types::{
    DataType, Direction, RelationType, RelationTypeId, SchemaStatus, SortOrder,
};
use super::{SchemaError, SchemaResult};
use crate::storage::StorageTree;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

const CHECKSUM_LEN: usize = 4;

#[derive(Debug)]
struct RegistryState {
    by_id: BTreeMap<RelationTypeId, Arc<RelationType>>,
    by_name: HashMap<String, RelationTypeId>,
    /// Index type ids per base type id, in creation order
    indexes: HashMap<RelationTypeId, Vec<RelationTypeId>>,
    next_id: RelationTypeId,
}

impl RegistryState {
    fn new() -> Self {
        let mut state = Self {
            by_id: BTreeMap::new(),
            by_name: HashMap::new(),
            indexes: HashMap::new(),
            next_id: SYSTEM_ID_LIMIT,
        };
        for key in ImplicitKey::ALL {
            let relation_type = key.relation_type();
            state
                .by_name
                .insert(relation_type.name.clone(), relation_type.id);
            state.by_id.insert(relation_type.id, relation_type);
        }
        state
    }

    fn insert(&mut self, relation_type: Arc<RelationType>) -> SchemaResult<()> {
        let id = relation_type.id;
        let successor = id.checked_add(1).ok_or_else(|| {
            SchemaError::CorruptSchemaState(format!(
                "relation type '{}' uses the last identifier {}",
                relation_type.name, id
            ))
        })?;
        match relation_type.base_type {
            Some(base) => {
                let ids = self.indexes.entry(base).or_default();
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            None => {
                self.by_name.insert(relation_type.name.clone(), id);
            }
        }
        self.next_id = self.next_id.max(successor);
        self.by_id.insert(id, relation_type);
        Ok(())
    }

    fn allocate_id(&mut self) -> SchemaResult<RelationTypeId> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(|| {
            SchemaError::InvalidDefinition("relation type identifiers are exhausted".to_string())
        })?;
        Ok(id)
    }

    /// Whether an index named `name` is already declared on `base`
    fn has_index_named(&self, base: RelationTypeId, name: &str) -> bool {
        self.indexes
            .get(&base)
            .into_iter()
            .flatten()
            .filter_map(|id| self.by_id.get(id))
            .any(|t| t.name == name)
    }

    fn resolve(&self, name: &str) -> Option<Arc<RelationType>> {
        self.by_name
            .get(name)
            .and_then(|id| self.by_id.get(id))
            .cloned()
    }
}

/// Thread-safe registry of relation types
#[derive(Debug)]
pub struct SchemaRegistry {
    state: RwLock<RegistryState>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Create a registry holding only the implicit system keys
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::new()),
        }
    }

    /// Define a property key
    pub fn make_property_key(
        &self,
        name: &str,
        data_type: DataType,
    ) -> SchemaResult<Arc<RelationType>> {
        self.define(name, |id| RelationType::property_key(id, name, data_type))
    }

    /// Define an edge label
    pub fn make_edge_label(&self, name: &str) -> SchemaResult<Arc<RelationType>> {
        self.define(name, |id| RelationType::edge_label(id, name))
    }

    fn define<F>(&self, name: &str, make: F) -> SchemaResult<Arc<RelationType>>
    where
        F: FnOnce(RelationTypeId) -> RelationType,
    {
        validate_type_name(name)?;

        let mut state = self.state.write();
        if state.by_name.contains_key(name) {
            return Err(SchemaError::AlreadyExists(name.to_string()));
        }
        let id = state.allocate_id()?;
        let relation_type = Arc::new(make(id));
        state.insert(relation_type.clone())?;
        log::debug!("Defined relation type '{}' with id {}", name, id);
        Ok(relation_type)
    }

    /// Declare an index over relation type `base_name`.
    ///
    /// The index starts out `Installed`.
    pub fn build_relation_index(
        &self,
        base_name: &str,
        index_name: &str,
        direction: Direction,
        sort_key: &[&str],
        sort_order: SortOrder,
    ) -> SchemaResult<RelationTypeIndex> {
        let internal_name = encode_index_type_name(base_name, index_name)?;

        let mut state = self.state.write();
        let base = state
            .resolve(base_name)
            .ok_or_else(|| SchemaError::NotFound(base_name.to_string()))?;
        if base.is_system() {
            return Err(SchemaError::InvalidDefinition(format!(
                "cannot index system type '{}'",
                base_name
            )));
        }
        if direction != Direction::Both && sort_key.is_empty() {
            return Err(SchemaError::InvalidDefinition(format!(
                "index '{}' restricted to {} needs a sort key",
                internal_name, direction
            )));
        }

        let mut seen = HashSet::new();
        let mut sort_key_ids = Vec::with_capacity(sort_key.len());
        for key_name in sort_key {
            let key = state
                .resolve(key_name)
                .ok_or_else(|| SchemaError::NotFound(key_name.to_string()))?;
            let comparable = key.data_type().map_or(false, |dt| dt.is_comparable());
            if !comparable || key.is_system() {
                return Err(SchemaError::InvalidDefinition(format!(
                    "'{}' cannot be used in a sort key",
                    key_name
                )));
            }
            if !seen.insert(key.id) {
                return Err(SchemaError::InvalidDefinition(format!(
                    "'{}' appears twice in the sort key of '{}'",
                    key_name, internal_name
                )));
            }
            sort_key_ids.push(key.id);
        }

        if state.has_index_named(base.id, &internal_name) {
            return Err(SchemaError::AlreadyExists(internal_name));
        }

        let id = state.allocate_id()?;
        let index_type = RelationType {
            id,
            name: internal_name,
            kind: base.kind,
            system: false,
            implicit: false,
            base_type: Some(base.id),
            sort_key: sort_key_ids,
            sort_order,
            direction_flags: direction.to_flags(),
            status: SchemaStatus::Installed,
        };
        let index_type = Arc::new(index_type);
        state.insert(index_type.clone())?;
        log::info!(
            "Built relation index '{}' ({}, {}) on '{}'",
            index_name,
            direction,
            sort_order,
            base_name
        );
        RelationTypeIndex::new(index_type)
    }

    /// Look up index `index_name` on `base_name`
    pub fn relation_index(&self, base_name: &str, index_name: &str) -> Option<RelationTypeIndex> {
        self.relation_indexes(base_name)
            .into_iter()
            .find(|index| index.name().map_or(false, |name| name == index_name))
    }

    /// All indexes declared on `base_name`, in creation order
    pub fn relation_indexes(&self, base_name: &str) -> Vec<RelationTypeIndex> {
        let state = self.state.read();
        let Some(base) = state.resolve(base_name) else {
            return Vec::new();
        };
        state
            .indexes
            .get(&base.id)
            .into_iter()
            .flatten()
            .filter_map(|id| state.by_id.get(id).cloned())
            .filter_map(|t| RelationTypeIndex::new(t).ok())
            .collect()
    }

    /// Move an index along its build lifecycle and return the updated view
    pub fn update_index_status(
        &self,
        index: &RelationTypeIndex,
        status: SchemaStatus,
    ) -> SchemaResult<RelationTypeIndex> {
        let mut state = self.state.write();
        let requested = index.wrapped_type();
        let current = state
            .by_id
            .get(&requested.id)
            .cloned()
            .ok_or(SchemaError::UnresolvedType(requested.id))?;
        if current.base_type.is_none() {
            return Err(SchemaError::InvalidDefinition(format!(
                "relation type '{}' is not an index type",
                current.name
            )));
        }
        if current.name != requested.name || current.base_type != requested.base_type {
            return Err(SchemaError::InvalidDefinition(format!(
                "index '{}' does not belong to this schema",
                requested.name
            )));
        }
        if !current.status.can_transition_to(status) {
            return Err(SchemaError::InvalidStatusTransition {
                from: current.status,
                to: status,
            });
        }

        let mut updated = (*current).clone();
        updated.status = status;
        let updated = Arc::new(updated);
        state.insert(updated.clone())?;
        log::info!(
            "Relation index '{}' status {} -> {}",
            updated.name,
            current.status,
            status
        );
        RelationTypeIndex::new(updated)
    }

    /// Number of user-defined types and indexes
    pub fn len(&self) -> usize {
        self.state
            .read()
            .by_id
            .values()
            .filter(|t| !t.is_system())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write all user-defined types to `tree`.
    ///
    /// Keys are big-endian identifiers so the tree iterates in id order.
    /// Values are a CRC32 (little endian) followed by the bincode encoding.
    pub fn persist(&self, tree: &dyn StorageTree) -> SchemaResult<usize> {
        let state = self.state.read();
        let mut written = 0;
        for relation_type in state.by_id.values().filter(|t| !t.is_system()) {
            let payload = bincode::serialize(relation_type.as_ref())?;
            let mut value = Vec::with_capacity(CHECKSUM_LEN + payload.len());
            value.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
            value.extend_from_slice(&payload);
            tree.insert(&relation_type.id.to_be_bytes(), &value)?;
            written += 1;
        }
        tree.flush()?;
        log::debug!("Persisted {} relation types", written);
        Ok(written)
    }

    /// Restore a registry from a tree written by [`SchemaRegistry::persist`]
    pub fn load(tree: &dyn StorageTree) -> SchemaResult<Self> {
        let mut state = RegistryState::new();
        for entry in tree.iter()? {
            let (key, value) = entry?;
            if value.len() < CHECKSUM_LEN {
                return Err(SchemaError::CorruptSchemaState(format!(
                    "truncated schema record under key {}",
                    crate::storage::bytes::to_hex(&key)
                )));
            }
            let (checksum, payload) = value.split_at(CHECKSUM_LEN);
            let mut expected = [0u8; CHECKSUM_LEN];
            expected.copy_from_slice(checksum);
            if u32::from_le_bytes(expected) != crc32fast::hash(payload) {
                return Err(SchemaError::CorruptSchemaState(format!(
                    "checksum mismatch in schema record under key {}",
                    crate::storage::bytes::to_hex(&key)
                )));
            }
            let relation_type: RelationType = bincode::deserialize(payload)?;
            if key != relation_type.id.to_be_bytes() {
                return Err(SchemaError::CorruptSchemaState(format!(
                    "record '{}' with id {} is stored under key {}",
                    relation_type.name,
                    relation_type.id,
                    crate::storage::bytes::to_hex(&key)
                )));
            }
            if relation_type.id < SYSTEM_ID_LIMIT || relation_type.system {
                return Err(SchemaError::CorruptSchemaState(format!(
                    "persisted record '{}' claims a system identifier",
                    relation_type.name
                )));
            }
            let duplicate = match relation_type.base_type {
                Some(base) => state.has_index_named(base, &relation_type.name),
                None => state.by_name.contains_key(&relation_type.name),
            };
            if duplicate {
                return Err(SchemaError::CorruptSchemaState(format!(
                    "relation type name '{}' is persisted twice",
                    relation_type.name
                )));
            }
            state.insert(Arc::new(relation_type))?;
        }
        for index_type in state.by_id.values() {
            let Some(base) = index_type.base_type else {
                continue;
            };
            let resolved = state.by_id.get(&base).map_or(false, |t| t.base_type.is_none());
            if !resolved {
                return Err(SchemaError::CorruptSchemaState(format!(
                    "index '{}' has no valid base type {}",
                    index_type.name, base
                )));
            }
        }
        log::debug!("Loaded {} relation types", state.by_id.len());
        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

impl SchemaInspector for SchemaRegistry {
    fn relation_type(&self, name: &str) -> Option<Arc<RelationType>> {
        self.state.read().resolve(name)
    }

    fn relation_type_by_id(&self, id: RelationTypeId) -> Option<Arc<RelationType>> {
        self.state.read().by_id.get(&id).cloned()
    }
}

fn validate_type_name(name: &str) -> SchemaResult<()> {
    if name.trim().is_empty() {
        return Err(SchemaError::InvalidDefinition(
            "relation type name must not be blank".to_string(),
        ));
    }
    if name.starts_with(SYSTEM_NAME_PREFIX) || ImplicitKey::from_name(name).is_some() {
        return Err(SchemaError::InvalidDefinition(format!(
            "'{}' is a reserved system name",
            name
        )));
    }
    if name.contains(RELATION_INDEX_SEPARATOR) {
        return Err(SchemaError::InvalidDefinition(format!(
            "'{}' contains the reserved separator '{}'",
            name, RELATION_INDEX_SEPARATOR
        )));
    }
    Ok(())
}
