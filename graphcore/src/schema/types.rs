// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Core schema type definitions for relation types and their indexes

use crate::storage::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Numeric identifier of a relation type within a schema registry
pub type RelationTypeId = u64;

/// Direction flag bit: the index only covers outgoing relations
pub const UNIDIRECTED_OUT: u8 = 0b01;
/// Direction flag bit: the index only covers incoming relations
pub const UNIDIRECTED_IN: u8 = 0b10;

/// Direction of relations relative to the queried vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    Out,
    In,
    #[default]
    Both,
}

impl Direction {
    /// Whether relations in `other` are a subset of relations in `self`
    pub fn covers(&self, other: Direction) -> bool {
        *self == Direction::Both || *self == other
    }

    /// Persisted flag bits for a direction restriction
    pub fn to_flags(&self) -> u8 {
        match self {
            Direction::Out => UNIDIRECTED_OUT,
            Direction::In => UNIDIRECTED_IN,
            Direction::Both => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Out => "OUT",
            Direction::In => "IN",
            Direction::Both => "BOTH",
        };
        write!(f, "{}", name)
    }
}

/// Sort order of an index or an ordering clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// Build status of a relation type index.
///
/// Lifecycle: `Installed -> Registered -> Enabled`, and any status other
/// than `Disabled` may move to `Disabled`. Indexes are never deleted, so
/// `Disabled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaStatus {
    Installed,
    Registered,
    Enabled,
    Disabled,
}

impl SchemaStatus {
    pub fn can_transition_to(&self, next: SchemaStatus) -> bool {
        matches!(
            (self, next),
            (SchemaStatus::Installed, SchemaStatus::Registered)
                | (SchemaStatus::Registered, SchemaStatus::Enabled)
                | (SchemaStatus::Installed, SchemaStatus::Disabled)
                | (SchemaStatus::Registered, SchemaStatus::Disabled)
                | (SchemaStatus::Enabled, SchemaStatus::Disabled)
        )
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaStatus::Installed => "INSTALLED",
            SchemaStatus::Registered => "REGISTERED",
            SchemaStatus::Enabled => "ENABLED",
            SchemaStatus::Disabled => "DISABLED",
        };
        write!(f, "{}", name)
    }
}

/// Category of relations a query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationCategory {
    Edge,
    Property,
    Relation,
}

/// Declared value types of property keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Array,
    /// Any value; not comparable
    Object,
}

impl DataType {
    /// Whether values of this type are mutually comparable (usable for ordering)
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            DataType::String
                | DataType::Integer
                | DataType::Float
                | DataType::Boolean
                | DataType::DateTime
        )
    }

    /// Whether `value` is an instance of this type. Null is accepted by all.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (DataType::Object, _) => true,
            (DataType::String, Value::String(_)) => true,
            (DataType::Integer, Value::Integer(_)) => true,
            (DataType::Float, Value::Float(_) | Value::Integer(_)) => true,
            (DataType::Boolean, Value::Boolean(_)) => true,
            (DataType::DateTime, Value::DateTime(_)) => true,
            (DataType::Array, Value::Array(_)) => true,
            _ => false,
        }
    }
}

/// Whether a relation type labels edges or keys properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    PropertyKey { data_type: DataType },
    EdgeLabel,
}

/// Schema entity identifying an edge label or a property key.
///
/// Relation type indexes are stored as relation types too: `base_type`
/// points at the indexed type and the name carries the index name after
/// the reserved separator (see [`crate::schema::index`]).
///
/// Equality and hashing use the identifier only, so status transitions do
/// not change identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationType {
    pub id: RelationTypeId,
    pub name: String,
    pub kind: RelationKind,
    /// Reserved type, not user-definable
    pub system: bool,
    /// Virtual type computed from the element reference
    pub implicit: bool,
    pub base_type: Option<RelationTypeId>,
    pub sort_key: Vec<RelationTypeId>,
    pub sort_order: SortOrder,
    /// Bit set of [`UNIDIRECTED_OUT`] / [`UNIDIRECTED_IN`]
    pub direction_flags: u8,
    pub status: SchemaStatus,
}

impl RelationType {
    pub fn property_key(id: RelationTypeId, name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(id, name, RelationKind::PropertyKey { data_type })
    }

    pub fn edge_label(id: RelationTypeId, name: impl Into<String>) -> Self {
        Self::new(id, name, RelationKind::EdgeLabel)
    }

    fn new(id: RelationTypeId, name: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            system: false,
            implicit: false,
            base_type: None,
            sort_key: Vec::new(),
            sort_order: SortOrder::Asc,
            direction_flags: 0,
            status: SchemaStatus::Enabled,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_property_key(&self) -> bool {
        matches!(self.kind, RelationKind::PropertyKey { .. })
    }

    pub fn is_edge_label(&self) -> bool {
        matches!(self.kind, RelationKind::EdgeLabel)
    }

    /// Declared data type; `None` for edge labels
    pub fn data_type(&self) -> Option<DataType> {
        match self.kind {
            RelationKind::PropertyKey { data_type } => Some(data_type),
            RelationKind::EdgeLabel => None,
        }
    }

    pub fn is_system(&self) -> bool {
        self.system
    }

    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Whether this type is the storage form of a relation type index
    pub fn is_index_type(&self) -> bool {
        self.base_type.is_some()
    }

    /// Whether the type is flagged as covering only `direction`.
    ///
    /// For `Both` this means neither single-direction flag is set.
    pub fn is_unidirected(&self, direction: Direction) -> bool {
        self.direction_flags == direction.to_flags()
    }
}

impl PartialEq for RelationType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RelationType {}

impl Hash for RelationType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lifecycle() {
        use SchemaStatus::*;
        assert!(Installed.can_transition_to(Registered));
        assert!(Registered.can_transition_to(Enabled));
        assert!(Enabled.can_transition_to(Disabled));
        assert!(!Installed.can_transition_to(Enabled));
        assert!(!Enabled.can_transition_to(Registered));
        assert!(!Disabled.can_transition_to(Enabled));
        assert!(!Enabled.can_transition_to(Enabled));
    }

    #[test]
    fn test_data_type_comparability() {
        assert!(DataType::Integer.is_comparable());
        assert!(DataType::String.is_comparable());
        assert!(!DataType::Object.is_comparable());
        assert!(!DataType::Array.is_comparable());
        assert!(DataType::Float.accepts(&Value::Integer(1)));
        assert!(!DataType::Integer.accepts(&Value::from("1")));
        assert!(DataType::Boolean.accepts(&Value::Null));
    }

    #[test]
    fn test_identity_is_id_only() {
        let mut a = RelationType::property_key(7, "age", DataType::Integer);
        let b = a.clone();
        a.status = SchemaStatus::Disabled;
        assert_eq!(a, b);
        assert_ne!(a, RelationType::property_key(8, "age", DataType::Integer));
    }

    #[test]
    fn test_direction_covers() {
        assert!(Direction::Both.covers(Direction::Out));
        assert!(Direction::Out.covers(Direction::Out));
        assert!(!Direction::Out.covers(Direction::Both));
        assert!(!Direction::In.covers(Direction::Out));
    }
}
