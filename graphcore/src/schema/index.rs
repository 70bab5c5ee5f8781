// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Relation type indexes
//
// The schema registry only persists relation types, so an index over a
// relation type is stored as an internal relation type named
// `<base-type-name>:<index-name>` that points back at its base type. This
// module owns that naming convention; nothing else parses those names.

use super::inspector::SchemaInspector;
use super::types::{
    Direction, RelationType, RelationTypeId, SchemaStatus, SortOrder, UNIDIRECTED_IN,
    UNIDIRECTED_OUT,
};
use super::{SchemaError, SchemaResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Reserved separator between base type name and index name
pub const RELATION_INDEX_SEPARATOR: char = ':';

/// Extract the index name from an internal index type name.
///
/// The last separator must be neither the first nor the last character.
pub fn decode_index_name(internal_name: &str) -> SchemaResult<&str> {
    match internal_name.rfind(RELATION_INDEX_SEPARATOR) {
        Some(pos) if pos > 0 && pos + RELATION_INDEX_SEPARATOR.len_utf8() < internal_name.len() => {
            Ok(&internal_name[pos + RELATION_INDEX_SEPARATOR.len_utf8()..])
        }
        _ => Err(SchemaError::InvalidIndexName(internal_name.to_string())),
    }
}

/// Build the internal type name for index `index_name` on `base_name`
pub fn encode_index_type_name(base_name: &str, index_name: &str) -> SchemaResult<String> {
    if base_name.trim().is_empty() || base_name.contains(RELATION_INDEX_SEPARATOR) {
        return Err(SchemaError::InvalidIndexName(format!(
            "{}{}{}",
            base_name, RELATION_INDEX_SEPARATOR, index_name
        )));
    }
    if index_name.trim().is_empty() || index_name.contains(RELATION_INDEX_SEPARATOR) {
        return Err(SchemaError::InvalidIndexName(format!(
            "{}{}{}",
            base_name, RELATION_INDEX_SEPARATOR, index_name
        )));
    }
    Ok(format!("{}{}{}", base_name, RELATION_INDEX_SEPARATOR, index_name))
}

/// Index view over an internal relation type.
///
/// Holds a snapshot of the internal type; status transitions performed by
/// the registry hand out a new `RelationTypeIndex`.
#[derive(Debug, Clone)]
pub struct RelationTypeIndex {
    wrapped: Arc<RelationType>,
}

impl RelationTypeIndex {
    /// Wrap an internal index type. Fails when the type has no base type.
    pub fn new(wrapped: Arc<RelationType>) -> SchemaResult<Self> {
        if wrapped.base_type.is_none() {
            return Err(SchemaError::InvalidDefinition(format!(
                "relation type '{}' is not an index type",
                wrapped.name
            )));
        }
        Ok(Self { wrapped })
    }

    pub fn wrapped_type(&self) -> &Arc<RelationType> {
        &self.wrapped
    }

    pub fn base_type_id(&self) -> RelationTypeId {
        // checked in new()
        self.wrapped.base_type.unwrap_or_default()
    }

    /// The relation type this index is maintained for
    pub fn base_type(&self, schema: &dyn SchemaInspector) -> SchemaResult<Arc<RelationType>> {
        let id = self.base_type_id();
        schema
            .relation_type_by_id(id)
            .ok_or(SchemaError::UnresolvedType(id))
    }

    /// Decoded index name
    pub fn name(&self) -> SchemaResult<&str> {
        decode_index_name(&self.wrapped.name)
    }

    pub fn sort_order(&self) -> SortOrder {
        self.wrapped.sort_order
    }

    /// Resolve the sort key identifiers, preserving declared order
    pub fn sort_key(&self, schema: &dyn SchemaInspector) -> SchemaResult<Vec<Arc<RelationType>>> {
        self.wrapped
            .sort_key
            .iter()
            .map(|&id| {
                schema
                    .relation_type_by_id(id)
                    .ok_or(SchemaError::UnresolvedType(id))
            })
            .collect()
    }

    /// Direction restriction derived from the unidirected flags
    pub fn direction(&self) -> SchemaResult<Direction> {
        match self.wrapped.direction_flags {
            0 => Ok(Direction::Both),
            UNIDIRECTED_OUT => Ok(Direction::Out),
            UNIDIRECTED_IN => Ok(Direction::In),
            flags => {
                log::warn!(
                    "Relation type index '{}' has inconsistent direction flags {:#04b}",
                    self.wrapped.name,
                    flags
                );
                Err(SchemaError::CorruptSchemaState(format!(
                    "direction flags {:#04b} on relation type '{}'",
                    flags, self.wrapped.name
                )))
            }
        }
    }

    pub fn status(&self) -> SchemaStatus {
        self.wrapped.status
    }
}

impl PartialEq for RelationTypeIndex {
    fn eq(&self, other: &Self) -> bool {
        self.wrapped == other.wrapped
    }
}

impl Eq for RelationTypeIndex {}

impl Hash for RelationTypeIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.wrapped.hash(state);
    }
}

impl fmt::Display for RelationTypeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Ok(name) => write!(f, "{}", name),
            Err(_) => write!(f, "{}", self.wrapped.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::DataType;
    use std::collections::HashSet;

    fn index_type(id: RelationTypeId, name: &str, flags: u8) -> Arc<RelationType> {
        let mut t = RelationType::property_key(id, name, DataType::Integer);
        t.base_type = Some(1100);
        t.direction_flags = flags;
        Arc::new(t)
    }

    #[test]
    fn test_decode_index_name() {
        assert_eq!(decode_index_name("age:by_value").unwrap(), "by_value");
        assert_eq!(decode_index_name("a:b:c").unwrap(), "c");
        assert_eq!(decode_index_name("a:b").unwrap(), "b");
        for bad in ["age", ":age", "age:", "", ":", "a::"] {
            assert!(
                matches!(decode_index_name(bad), Err(SchemaError::InvalidIndexName(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_encode_index_type_name() {
        assert_eq!(encode_index_type_name("age", "by_value").unwrap(), "age:by_value");
        assert!(encode_index_type_name("a:b", "idx").is_err());
        assert!(encode_index_type_name("age", "").is_err());
        assert!(encode_index_type_name("", "idx").is_err());
        assert!(encode_index_type_name("age", "x:y").is_err());
    }

    #[test]
    fn test_direction_from_flags() {
        let both = RelationTypeIndex::new(index_type(2000, "knows:i0", 0)).unwrap();
        let out = RelationTypeIndex::new(index_type(2001, "knows:i1", UNIDIRECTED_OUT)).unwrap();
        let inbound = RelationTypeIndex::new(index_type(2002, "knows:i2", UNIDIRECTED_IN)).unwrap();
        assert_eq!(both.direction().unwrap(), Direction::Both);
        assert_eq!(out.direction().unwrap(), Direction::Out);
        assert_eq!(inbound.direction().unwrap(), Direction::In);

        let corrupt = RelationTypeIndex::new(index_type(
            2003,
            "knows:i3",
            UNIDIRECTED_IN | UNIDIRECTED_OUT,
        ))
        .unwrap();
        assert!(matches!(
            corrupt.direction(),
            Err(SchemaError::CorruptSchemaState(_))
        ));
    }

    #[test]
    fn test_requires_base_type() {
        let plain = Arc::new(RelationType::edge_label(1500, "knows"));
        assert!(RelationTypeIndex::new(plain).is_err());
    }

    #[test]
    fn test_equality_follows_wrapped_type() {
        let a = RelationTypeIndex::new(index_type(2000, "knows:i0", 0)).unwrap();
        let mut changed = (*index_type(2000, "knows:i0", 0)).clone();
        changed.status = SchemaStatus::Disabled;
        let b = RelationTypeIndex::new(Arc::new(changed)).unwrap();
        let c = RelationTypeIndex::new(index_type(2001, "knows:i0", 0)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(a.to_string(), "i0");
    }
}
