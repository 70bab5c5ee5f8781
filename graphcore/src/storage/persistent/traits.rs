// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage driver traits
//!
//! Every driver orders keys by unsigned byte value, the same order
//! [`crate::storage::bytes::compare`] defines. Range scans rely on it.

use super::types::{ScanIter, StorageResult, StorageType};
use crate::storage::bytes::KeyRange;
use std::path::Path;

/// A named, ordered collection of key-value pairs within a storage driver
pub trait StorageTree: Send + Sync {
    /// Insert a key-value pair
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Get a value by key
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Remove a key-value pair
    fn remove(&self, key: &[u8]) -> StorageResult<()>;

    /// Check if the tree is empty
    fn is_empty(&self) -> StorageResult<bool>;

    /// Iterate over all key-value pairs in key order
    fn iter(&self) -> StorageResult<ScanIter<'_>>;

    /// Scan with a key prefix
    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<ScanIter<'_>>;

    /// Scan the half-open range `[range.start, range.end)` in key order.
    /// An empty range yields nothing.
    fn scan_range(&self, range: &KeyRange) -> StorageResult<ScanIter<'_>>;

    /// Flush any pending writes to disk
    fn flush(&self) -> StorageResult<()>;
}

/// Main storage driver trait
pub trait StorageDriver: Send + Sync {
    /// Type of tree used by this driver
    type Tree: StorageTree;

    /// Open or create a storage driver at the given path
    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self>
    where
        Self: Sized;

    /// Open or create a named tree
    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree>;

    /// List all available trees
    fn list_trees(&self) -> StorageResult<Vec<String>>;

    /// Flush all pending writes to disk
    fn flush(&self) -> StorageResult<()>;

    /// Get storage type
    fn storage_type(&self) -> StorageType;
}

impl StorageTree for Box<dyn StorageTree> {
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        (**self).insert(key, value)
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn remove(&self, key: &[u8]) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn is_empty(&self) -> StorageResult<bool> {
        (**self).is_empty()
    }

    fn iter(&self) -> StorageResult<ScanIter<'_>> {
        (**self).iter()
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<ScanIter<'_>> {
        (**self).scan_prefix(prefix)
    }

    fn scan_range(&self, range: &KeyRange) -> StorageResult<ScanIter<'_>> {
        (**self).scan_range(range)
    }

    fn flush(&self) -> StorageResult<()> {
        (**self).flush()
    }
}
