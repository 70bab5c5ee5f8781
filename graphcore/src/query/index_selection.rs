// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Relation type index selection
//!
//! Picks the index a range scan should use for a finalized query: the
//! index must be enabled, belong to the query's single relation type, cover
//! the query direction and, if the query is ordered, be sorted by the
//! ordering key in the requested order. Among those, the index whose sort
//! key prefix covers the most constrained keys wins; ties go to the
//! earliest candidate.

use super::descriptor::VertexCentricQuery;
use super::QueryResult;
use crate::schema::{RelationTypeIndex, SchemaInspector, SchemaStatus};

pub fn select_relation_index(
    query: &VertexCentricQuery,
    candidates: &[RelationTypeIndex],
    schema: &dyn SchemaInspector,
) -> QueryResult<Option<RelationTypeIndex>> {
    let [type_name] = query.types() else {
        return Ok(None);
    };
    let Some(relation_type) = schema.relation_type(type_name) else {
        return Ok(None);
    };
    if relation_type.is_implicit() {
        return Ok(None);
    }

    let mut best: Option<(usize, &RelationTypeIndex)> = None;
    for index in candidates {
        if index.status() != SchemaStatus::Enabled || index.base_type_id() != relation_type.id {
            continue;
        }
        if !index.direction()?.covers(query.direction()) {
            continue;
        }

        let sort_key = index.sort_key(schema)?;
        if let Some(order) = query.order() {
            let leads_with_order_key = sort_key.first().map_or(false, |k| *k == order.key);
            if !leads_with_order_key || index.sort_order() != order.order {
                continue;
            }
        }

        // number of leading sort key entries that are constrained
        let covered = sort_key
            .iter()
            .take_while(|key| query.constraints().iter().any(|c| c.key == key.name))
            .count();
        if best.map_or(true, |(score, _)| covered > score) {
            best = Some((covered, index));
        }
    }

    match best {
        Some((covered, index)) => {
            log::debug!(
                "Selected relation index '{}' for {} (covers {} constrained keys)",
                index,
                query,
                covered
            );
            Ok(Some(index.clone()))
        }
        None => {
            log::trace!("No relation index applies to {}", query);
            Ok(None)
        }
    }
}
