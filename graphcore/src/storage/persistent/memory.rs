// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory storage driver implementation
//!
//! Trees are `BTreeMap<Vec<u8>, Vec<u8>>`; `Vec<u8>` orders lexicographically
//! by unsigned byte with shorter prefixes first, matching the on-disk drivers.

use super::traits::{StorageDriver, StorageTree};
use super::types::{ScanIter, StorageResult, StorageType};
use crate::storage::bytes::KeyRange;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

type TreeData = Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>;

/// In-memory storage driver
#[derive(Default)]
pub struct MemoryStorageDriver {
    trees: Arc<RwLock<HashMap<String, TreeData>>>,
}

/// In-memory tree implementation
pub struct MemoryTree {
    data: TreeData,
}

impl MemoryStorageDriver {
    /// Create a new memory storage driver
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryTree {
    // Scans snapshot the matching entries so the read lock is not held
    // across the caller's iteration.
    fn snapshot<'a, I>(entries: I) -> ScanIter<'static>
    where
        I: Iterator<Item = (&'a Vec<u8>, &'a Vec<u8>)>,
    {
        let items: Vec<_> = entries.map(|(k, v)| Ok((k.clone(), v.clone()))).collect();
        Box::new(items.into_iter())
    }
}

impl StorageTree for MemoryTree {
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn remove(&self, key: &[u8]) -> StorageResult<()> {
        self.data.write().remove(key);
        Ok(())
    }

    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.data.read().is_empty())
    }

    fn iter(&self) -> StorageResult<ScanIter<'_>> {
        let data = self.data.read();
        Ok(Self::snapshot(data.iter()))
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<ScanIter<'_>> {
        let data = self.data.read();
        Ok(Self::snapshot(
            data.range(prefix.to_vec()..)
                .take_while(|(k, _)| k.starts_with(prefix)),
        ))
    }

    fn scan_range(&self, range: &KeyRange) -> StorageResult<ScanIter<'_>> {
        if range.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }
        let data = self.data.read();
        Ok(Self::snapshot(
            data.range(range.start.clone()..range.end.clone()),
        ))
    }

    fn flush(&self) -> StorageResult<()> {
        Ok(())
    }
}

impl StorageDriver for MemoryStorageDriver {
    type Tree = Box<dyn StorageTree>;

    fn open<P: AsRef<Path>>(_path: P) -> StorageResult<Self> {
        Ok(Self::new())
    }

    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree> {
        let mut trees = self.trees.write();
        let data = trees
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(BTreeMap::new())))
            .clone();
        Ok(Box::new(MemoryTree { data }) as Box<dyn StorageTree>)
    }

    fn list_trees(&self) -> StorageResult<Vec<String>> {
        let mut names: Vec<String> = self.trees.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn flush(&self) -> StorageResult<()> {
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Memory
    }
}
