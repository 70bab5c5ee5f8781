// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Vertex-centric query builder
//!
//! Accumulates the direction, relation types, constraints, adjacency,
//! ordering and limit of a query over the relations of one vertex. Every
//! configuration call validates its input immediately and leaves the builder
//! untouched when it fails; [`VertexCentricQueryBuilder::build`] freezes a
//! snapshot of the accumulated state into a [`VertexCentricQuery`].
//!
//! Implicit keys are rerouted here, before planning:
//! - `~adjacent = <vertex id>` becomes an adjacency constraint
//! - `id <cmp> <relation id>` becomes `~nid <cmp> <raw relation id>`

use super::descriptor::{OrderEntry, VertexCentricQuery};
use super::predicate::{Cmp, PredicateCondition};
use super::{QueryError, QueryResult};
use crate::config::CoreConfig;
use crate::graph::{Element, RelationIdentifier, VertexId, VertexLookup, VertexRef};
use crate::schema::{
    Direction, ImplicitKey, RelationCategory, RelationType, SchemaInspector, SortOrder,
};
use crate::storage::Value;
use std::fmt;
use std::sync::Arc;

/// Default initial capacity of the constraint list
pub const DEFAULT_CONSTRAINT_CAPACITY: usize = 5;

/// Builder for a [`VertexCentricQuery`]. Single-owner; not shared across threads.
pub struct VertexCentricQueryBuilder {
    schema: Arc<dyn SchemaInspector>,
    vertices: Arc<dyn VertexLookup>,
    /// BOTH by default
    direction: Direction,
    /// Empty means all relation types
    types: Vec<String>,
    /// Allocated on the first constraint
    constraints: Option<Vec<PredicateCondition>>,
    constraint_capacity: usize,
    adjacent: Option<VertexRef>,
    order: Option<OrderEntry>,
    /// `None` means no limit
    limit: Option<usize>,
}

impl VertexCentricQueryBuilder {
    pub fn new(schema: Arc<dyn SchemaInspector>, vertices: Arc<dyn VertexLookup>) -> Self {
        Self {
            schema,
            vertices,
            direction: Direction::Both,
            types: Vec::new(),
            constraints: None,
            constraint_capacity: DEFAULT_CONSTRAINT_CAPACITY,
            adjacent: None,
            order: None,
            limit: None,
        }
    }

    pub fn with_config(
        schema: Arc<dyn SchemaInspector>,
        vertices: Arc<dyn VertexLookup>,
        config: &CoreConfig,
    ) -> Self {
        let mut builder = Self::new(schema, vertices);
        builder.constraint_capacity = config.constraint_capacity;
        builder
    }

    /* ---------------------------------------------------------------
     * Query construction
     * --------------------------------------------------------------- */

    pub fn direction(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self
    }

    /// Restrict the query to the named relation types; an empty slice
    /// resets to all types.
    pub fn types<S: AsRef<str>>(&mut self, names: &[S]) -> QueryResult<&mut Self> {
        if let Some(blank) = names.iter().find(|n| n.as_ref().trim().is_empty()) {
            return Err(QueryError::InvalidArgument(format!(
                "Invalid type: '{}'",
                blank.as_ref()
            )));
        }
        self.types = names.iter().map(|n| n.as_ref().to_string()).collect();
        Ok(self)
    }

    pub fn labels<S: AsRef<str>>(&mut self, labels: &[S]) -> QueryResult<&mut Self> {
        self.types(labels)
    }

    pub fn keys<S: AsRef<str>>(&mut self, keys: &[S]) -> QueryResult<&mut Self> {
        self.types(keys)
    }

    pub fn relation_type(&mut self, relation_type: &RelationType) -> QueryResult<&mut Self> {
        self.types(&[relation_type.name()])
    }

    pub fn relation_types(
        &mut self,
        relation_types: &[Arc<RelationType>],
    ) -> QueryResult<&mut Self> {
        let names: Vec<&str> = relation_types.iter().map(|t| t.name()).collect();
        self.types(&names)
    }

    /// Add `key <predicate> value`.
    ///
    /// `~adjacent` only accepts equality and sets the adjacent vertex
    /// instead of adding a constraint. `id` is rewritten into a constraint
    /// on `~nid` with the raw relation identifier.
    pub fn with_constraint(
        &mut self,
        key: &str,
        predicate: Cmp,
        value: impl Into<Value>,
    ) -> QueryResult<&mut Self> {
        if key.trim().is_empty() {
            return Err(QueryError::InvalidArgument(
                "Constraint key must not be blank".to_string(),
            ));
        }
        let value = value.into();

        match ImplicitKey::from_name(key) {
            Some(ImplicitKey::AdjacentId) => {
                if predicate != Cmp::Equal {
                    return Err(QueryError::InvalidArgument(format!(
                        "Only equality constraints are supported for {}",
                        key
                    )));
                }
                let vertex = self.vertices.vertex(vertex_id_of(&value)?)?;
                log::debug!("Rewrote {} = {} into adjacency constraint", key, value);
                Ok(self.set_adjacent(vertex))
            }
            Some(ImplicitKey::Id) => {
                let relation_id = relation_id_of(&value)?;
                let raw = i64::try_from(relation_id.relation_id).map_err(|_| {
                    QueryError::InvalidArgument(format!(
                        "Relation id out of range: {}",
                        relation_id
                    ))
                })?;
                log::debug!(
                    "Rewrote {} {} {} into {} constraint",
                    key,
                    predicate,
                    relation_id,
                    ImplicitKey::InternalId.name()
                );
                self.push_constraint(ImplicitKey::InternalId.name(), predicate, Value::Integer(raw))
            }
            _ => self.push_constraint(key, predicate, value),
        }
    }

    fn push_constraint(
        &mut self,
        key: &str,
        predicate: Cmp,
        value: Value,
    ) -> QueryResult<&mut Self> {
        if !predicate.is_valid_condition(&value) {
            return Err(QueryError::InvalidArgument(format!(
                "Invalid condition provided: {} {} {}",
                key, predicate, value
            )));
        }
        let capacity = self.constraint_capacity;
        self.constraints
            .get_or_insert_with(|| Vec::with_capacity(capacity))
            .push(PredicateCondition::new(key, predicate, value));
        Ok(self)
    }

    /// `key = value`
    pub fn has(&mut self, key: &str, value: impl Into<Value>) -> QueryResult<&mut Self> {
        self.with_constraint(key, Cmp::Equal, value)
    }

    /// `key <> value`
    pub fn has_not(&mut self, key: &str, value: impl Into<Value>) -> QueryResult<&mut Self> {
        self.with_constraint(key, Cmp::NotEqual, value)
    }

    /// `key` is set
    pub fn has_key(&mut self, key: &str) -> QueryResult<&mut Self> {
        self.with_constraint(key, Cmp::NotEqual, Value::Null)
    }

    /// `key` is unset
    pub fn has_not_key(&mut self, key: &str) -> QueryResult<&mut Self> {
        self.with_constraint(key, Cmp::Equal, Value::Null)
    }

    /// `start <= key < end`. An empty interval is legal and matches nothing.
    pub fn interval(
        &mut self,
        key: &str,
        start: impl Into<Value>,
        end: impl Into<Value>,
    ) -> QueryResult<&mut Self> {
        self.with_constraint(key, Cmp::GreaterThanEqual, start)?
            .with_constraint(key, Cmp::LessThan, end)
    }

    /// Order results by property key `key_name`. Only one ordering is
    /// supported; a second call fails and keeps the first.
    pub fn order_by(&mut self, key_name: &str, order: SortOrder) -> QueryResult<&mut Self> {
        let key = self.schema.property_key(key_name).ok_or_else(|| {
            QueryError::InvalidArgument(format!("Provided key does not exist: {}", key_name))
        })?;
        let comparable = key.data_type().map_or(false, |dt| dt.is_comparable());
        if !comparable {
            return Err(QueryError::InvalidArgument(format!(
                "Can only order on keys with comparable data type. [{}] has datatype [{:?}]",
                key.name(),
                key.data_type()
            )));
        }
        if key.is_system() {
            return Err(QueryError::InvalidArgument(format!(
                "Cannot use system types in ordering: {}",
                key.name()
            )));
        }
        if self.order.is_some() {
            return Err(QueryError::InvalidArgument(
                "Only a single sort order is supported on vertex queries".to_string(),
            ));
        }
        self.order = Some(OrderEntry { key, order });
        Ok(self)
    }

    /// Maximum number of results; must not be negative
    pub fn limit(&mut self, limit: i64) -> QueryResult<&mut Self> {
        let limit = usize::try_from(limit).map_err(|_| {
            if limit < 0 {
                QueryError::InvalidArgument(format!("Limit must not be negative: {}", limit))
            } else {
                QueryError::InvalidArgument(format!("Limit out of range: {}", limit))
            }
        })?;
        self.limit = Some(limit);
        Ok(self)
    }

    /// Only return relations whose other end is `vertex`; replaces any
    /// earlier adjacent vertex.
    pub fn adjacent(&mut self, vertex: impl Into<Element>) -> QueryResult<&mut Self> {
        match vertex.into().as_vertex() {
            Some(vertex) => Ok(self.set_adjacent(vertex)),
            None => Err(QueryError::InvalidArgument(
                "Not a valid vertex provided for adjacency constraint".to_string(),
            )),
        }
    }

    fn set_adjacent(&mut self, vertex: VertexRef) -> &mut Self {
        self.adjacent = Some(vertex);
        self
    }

    /// Freeze the accumulated state. The builder stays usable.
    pub fn build(&self) -> VertexCentricQuery {
        VertexCentricQuery {
            direction: self.direction,
            types: self.types.as_slice().into(),
            constraints: self.constraints.as_deref().unwrap_or_default().into(),
            adjacent: self.adjacent,
            order: self.order.clone(),
            limit: self.limit,
        }
    }

    /* ---------------------------------------------------------------
     * Inspection
     * --------------------------------------------------------------- */

    pub fn has_types(&self) -> bool {
        !self.types.is_empty()
    }

    /// Exactly one type is named and it resolves in the schema
    pub fn has_single_type(&self) -> bool {
        self.types.len() == 1 && self.schema.relation_type(&self.types[0]).is_some()
    }

    /// The single filtered type. Check [`has_single_type`](Self::has_single_type) first.
    pub fn single_type(&self) -> QueryResult<Arc<RelationType>> {
        if self.types.len() != 1 {
            return Err(QueryError::IllegalState(format!(
                "Expected a single relation type, query names {}",
                self.types.len()
            )));
        }
        self.schema.relation_type(&self.types[0]).ok_or_else(|| {
            QueryError::IllegalState(format!("Relation type '{}' does not resolve", self.types[0]))
        })
    }

    /// Whether the query asks for the value of an implicit key and must be
    /// answered directly instead of through storage index planning.
    pub fn is_implicit_key_query(&self, return_category: RelationCategory) -> bool {
        return_category != RelationCategory::Edge
            && self.types.len() == 1
            && self.constraint_count() == 0
            && self
                .schema
                .relation_type(&self.types[0])
                .map_or(false, |t| t.is_implicit())
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.as_ref().map_or(0, Vec::len)
    }

    /// Whether the constraint list has been materialized
    pub fn has_constraint_storage(&self) -> bool {
        self.constraints.is_some()
    }
}

impl fmt::Debug for VertexCentricQueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexCentricQueryBuilder")
            .field("direction", &self.direction)
            .field("types", &self.types)
            .field("constraints", &self.constraints)
            .field("adjacent", &self.adjacent)
            .field("order", &self.order)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

fn vertex_id_of(value: &Value) -> QueryResult<VertexId> {
    let id = match value {
        Value::Vertex(vertex) => Some(vertex.id()),
        Value::Integer(n) => VertexId::try_from(*n).ok(),
        Value::String(s) => s.trim().parse::<VertexId>().ok(),
        _ => None,
    };
    id.ok_or_else(|| QueryError::InvalidArgument(format!("Expected valid vertex id: {}", value)))
}

fn relation_id_of(value: &Value) -> QueryResult<RelationIdentifier> {
    match value {
        Value::Relation(rid) => Ok(*rid),
        Value::String(s) => Ok(RelationIdentifier::parse(s)?),
        _ => Err(QueryError::InvalidArgument(format!(
            "Expected valid relation id: {}",
            value
        ))),
    }
}
