// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Comparison predicates and constraints

use crate::storage::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Comparison predicate of a constraint.
///
/// "Is set" and "is unset" are `NotEqual` and `Equal` against `Value::Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cmp {
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
}

impl Cmp {
    /// Whether `value` is an acceptable operand for this predicate.
    ///
    /// (In)equality accepts anything including null; ordering comparisons
    /// need a non-null orderable value.
    pub fn is_valid_condition(&self, value: &Value) -> bool {
        match self {
            Cmp::Equal | Cmp::NotEqual => true,
            Cmp::LessThan | Cmp::LessThanEqual | Cmp::GreaterThan | Cmp::GreaterThanEqual => {
                value.is_orderable()
            }
        }
    }

    /// Evaluate `candidate <self> condition`.
    ///
    /// A missing value is passed as `Value::Null`. Ordering comparisons are
    /// false when either side is null or the kinds are incomparable.
    pub fn evaluate(&self, candidate: &Value, condition: &Value) -> bool {
        match self {
            Cmp::Equal => values_equal(candidate, condition),
            Cmp::NotEqual => !values_equal(candidate, condition),
            Cmp::LessThan => matches!(candidate.compare(condition), Some(Ordering::Less)),
            Cmp::LessThanEqual => matches!(
                candidate.compare(condition),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Cmp::GreaterThan => matches!(candidate.compare(condition), Some(Ordering::Greater)),
            Cmp::GreaterThanEqual => matches!(
                candidate.compare(condition),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }

    /// Opposite predicate. It is the exact complement only for operands
    /// that compare; ordering predicates are false on both sides when
    /// either operand is null or the two are incomparable.
    pub fn negate(&self) -> Cmp {
        match self {
            Cmp::Equal => Cmp::NotEqual,
            Cmp::NotEqual => Cmp::Equal,
            Cmp::LessThan => Cmp::GreaterThanEqual,
            Cmp::LessThanEqual => Cmp::GreaterThan,
            Cmp::GreaterThan => Cmp::LessThanEqual,
            Cmp::GreaterThanEqual => Cmp::LessThan,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Cmp::Equal => "=",
            Cmp::NotEqual => "<>",
            Cmp::LessThan => "<",
            Cmp::LessThanEqual => "<=",
            Cmp::GreaterThan => ">",
            Cmp::GreaterThanEqual => ">=",
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match a.compare(b) {
        Some(ordering) => ordering == Ordering::Equal,
        None => a == b,
    }
}

impl fmt::Display for Cmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One constraint of a vertex-centric query: `key <predicate> value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredicateCondition {
    pub key: String,
    pub predicate: Cmp,
    pub value: Value,
}

impl PredicateCondition {
    pub fn new(key: impl Into<String>, predicate: Cmp, value: Value) -> Self {
        Self {
            key: key.into(),
            predicate,
            value,
        }
    }

    /// Check a candidate value of `key` against this constraint
    pub fn evaluate(&self, candidate: &Value) -> bool {
        self.predicate.evaluate(candidate, &self.value)
    }
}

impl fmt::Display for PredicateCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.predicate, self.value)
    }
}
