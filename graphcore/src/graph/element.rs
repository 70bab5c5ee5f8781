// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Vertex and relation references

use super::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric vertex identifier
pub type VertexId = u64;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_DELIMITER: char = '-';

/// Reference to a vertex of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexRef {
    id: VertexId,
}

impl VertexRef {
    pub fn new(id: VertexId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }
}

/// Structured identifier of a relation (edge or property).
///
/// Text form is `relation-out-type[-in]`, each part base-36 encoded. The
/// in-vertex part is present for edges only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationIdentifier {
    pub relation_id: u64,
    pub out_vertex_id: VertexId,
    pub type_id: u64,
    pub in_vertex_id: Option<VertexId>,
}

impl RelationIdentifier {
    pub fn property(relation_id: u64, vertex_id: VertexId, type_id: u64) -> Self {
        Self {
            relation_id,
            out_vertex_id: vertex_id,
            type_id,
            in_vertex_id: None,
        }
    }

    pub fn edge(
        relation_id: u64,
        out_vertex_id: VertexId,
        type_id: u64,
        in_vertex_id: VertexId,
    ) -> Self {
        Self {
            relation_id,
            out_vertex_id,
            type_id,
            in_vertex_id: Some(in_vertex_id),
        }
    }

    pub fn parse(text: &str) -> GraphResult<Self> {
        let parts: Vec<&str> = text.split(ID_DELIMITER).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(GraphError::InvalidRelationId(text.to_string()));
        }
        let decode = |part: &str| {
            decode_base36(part).ok_or_else(|| GraphError::InvalidRelationId(text.to_string()))
        };
        Ok(Self {
            relation_id: decode(parts[0])?,
            out_vertex_id: decode(parts[1])?,
            type_id: decode(parts[2])?,
            in_vertex_id: parts.get(3).map(|p| decode(*p)).transpose()?,
        })
    }
}

impl fmt::Display for RelationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            encode_base36(self.relation_id),
            ID_DELIMITER,
            encode_base36(self.out_vertex_id),
            ID_DELIMITER,
            encode_base36(self.type_id)
        )?;
        if let Some(in_vertex) = self.in_vertex_id {
            write!(f, "{}{}", ID_DELIMITER, encode_base36(in_vertex))?;
        }
        Ok(())
    }
}

impl FromStr for RelationIdentifier {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn encode_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

fn decode_base36(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for c in text.chars() {
        let digit = c.to_digit(36)? as u64;
        n = n.checked_mul(36)?.checked_add(digit)?;
    }
    Some(n)
}

/// A graph element handed to the query builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Vertex(VertexRef),
    Relation(RelationIdentifier),
}

impl Element {
    pub fn as_vertex(&self) -> Option<VertexRef> {
        match self {
            Element::Vertex(v) => Some(*v),
            Element::Relation(_) => None,
        }
    }
}

impl From<VertexRef> for Element {
    fn from(v: VertexRef) -> Self {
        Element::Vertex(v)
    }
}

impl From<RelationIdentifier> for Element {
    fn from(r: RelationIdentifier) -> Self {
        Element::Relation(r)
    }
}
