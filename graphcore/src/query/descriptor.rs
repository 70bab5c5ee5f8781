// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Finalized vertex-centric query

use super::predicate::PredicateCondition;
use crate::graph::VertexRef;
use crate::schema::{Direction, RelationType, SortOrder};
use std::fmt;
use std::sync::Arc;

/// Single ordering clause: sort by a property key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    pub key: Arc<RelationType>,
    pub order: SortOrder,
}

/// Immutable snapshot produced by
/// [`VertexCentricQueryBuilder::build`](super::VertexCentricQueryBuilder::build).
///
/// Cloning is cheap; type names and constraints are shared.
#[derive(Debug, Clone)]
pub struct VertexCentricQuery {
    pub(super) direction: Direction,
    pub(super) types: Arc<[String]>,
    pub(super) constraints: Arc<[PredicateCondition]>,
    pub(super) adjacent: Option<VertexRef>,
    pub(super) order: Option<OrderEntry>,
    pub(super) limit: Option<usize>,
}

impl VertexCentricQuery {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Relation type names to return; empty means all types
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn has_type_filter(&self) -> bool {
        !self.types.is_empty()
    }

    /// Constraints in the order they were added
    pub fn constraints(&self) -> &[PredicateCondition] {
        &self.constraints
    }

    pub fn adjacent_vertex(&self) -> Option<VertexRef> {
        self.adjacent
    }

    pub fn order(&self) -> Option<&OrderEntry> {
        self.order.as_ref()
    }

    /// `None` means unbounded; `Some(0)` returns nothing
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }
}

impl fmt::Display for VertexCentricQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.direction)?;
        if self.has_type_filter() {
            write!(f, " [{}]", self.types.join(", "))?;
        }
        for (i, constraint) in self.constraints.iter().enumerate() {
            let joiner = if i == 0 { " WHERE" } else { " AND" };
            write!(f, "{} {}", joiner, constraint)?;
        }
        if let Some(vertex) = self.adjacent {
            write!(f, " ADJACENT v[{}]", vertex.id())?;
        }
        if let Some(order) = &self.order {
            write!(f, " ORDER BY {} {}", order.key.name(), order.order)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        Ok(())
    }
}
