// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Byte ordering for storage keys
//!
//! The storage drivers order keys by raw unsigned byte value. Every other
//! component that compares encoded keys (index sort order, range-scan bounds)
//! goes through this module so the orders agree:
//! - Comparison is unsigned and byte-by-byte from the start
//! - A strict prefix sorts before any longer key it prefixes
//! - `all_zeros` / `all_ones` give the minimum / maximum key of a width

use super::persistent::types::{StorageDriverError, StorageResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Three-way unsigned comparison of two byte sequences.
///
/// Returns `-1`, `0` or `1`. Identical slices (same address and length)
/// short-circuit to `0`.
pub fn compare(a: &[u8], b: &[u8]) -> i32 {
    match compare_bytes(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Same as [`compare`] but yields an [`Ordering`].
pub fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    if std::ptr::eq(a, b) {
        return Ordering::Equal;
    }
    for (x, y) in a.iter().zip(b.iter()) {
        // u8 is unsigned, so this is the 0-255 order the drivers use
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Whether `a` sorts strictly before `b`
pub fn is_less_than(a: &[u8], b: &[u8]) -> bool {
    compare(a, b) < 0
}

/// Whether `a` sorts before or equal to `b`
pub fn is_less_or_equal(a: &[u8], b: &[u8]) -> bool {
    compare(a, b) <= 0
}

/// Smallest key of the given width (all `0x00`)
pub fn all_zeros(len: usize) -> Vec<u8> {
    vec![0x00; len]
}

/// Largest key of the given width (all `0xFF`)
pub fn all_ones(len: usize) -> Vec<u8> {
    vec![0xFF; len]
}

/// Lowercase hex rendering, two characters per byte, in byte order.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Inverse of [`to_hex`]. Accepts upper or lower case digits.
pub fn from_hex(text: &str) -> StorageResult<Vec<u8>> {
    hex::decode(text).map_err(|e| StorageDriverError::InvalidHex(format!("{} in '{}'", e, text)))
}

/// Renders each byte as its unsigned decimal value joined by `separator`.
/// Diagnostic only.
pub fn to_display_string(bytes: &[u8], separator: &str) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Owned storage key whose ordering is the storage order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteKey(Vec<u8>);

impl ByteKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl Ord for ByteKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_bytes(&self.0, &other.0)
    }
}

impl PartialOrd for ByteKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Vec<u8>> for ByteKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for ByteKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ByteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Half-open key range `[start, end)` handed to a storage range scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRange {
    pub start: Vec<u8>,
    pub end: Vec<u8>,
}

impl KeyRange {
    pub fn new(start: Vec<u8>, end: Vec<u8>) -> Self {
        Self { start, end }
    }

    /// Range spanning every key of the given width.
    ///
    /// The end bound is `all_ones(width)` itself, so the maximum key of that
    /// width is excluded; longer keys prefixed by it are excluded too.
    pub fn open(width: usize) -> Self {
        Self {
            start: all_zeros(width),
            end: all_ones(width),
        }
    }

    /// Range covering every key starting with `prefix`, or `None` when the
    /// prefix is all `0xFF` and has no finite upper bound.
    pub fn prefix(prefix: &[u8]) -> Option<Self> {
        let mut end = prefix.to_vec();
        while let Some(last) = end.pop() {
            if last < 0xFF {
                end.push(last + 1);
                return Some(Self {
                    start: prefix.to_vec(),
                    end,
                });
            }
        }
        None
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        is_less_or_equal(&self.start, key) && is_less_than(key, &self.end)
    }

    /// A range whose end does not exceed its start selects nothing
    pub fn is_empty(&self) -> bool {
        is_less_or_equal(&self.end, &self.start)
    }
}

impl fmt::Display for KeyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", to_hex(&self.start), to_hex(&self.end))
    }
}
