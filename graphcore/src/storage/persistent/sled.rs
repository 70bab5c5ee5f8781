// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Sled storage driver implementation

use super::traits::{StorageDriver, StorageTree};
use super::types::{ScanIter, StorageDriverError, StorageResult, StorageType};
use crate::storage::bytes::KeyRange;
use std::path::Path;

/// Sled driver implementation
pub struct SledDriver {
    db: sled::Db,
}

/// Sled tree wrapper that implements StorageTree trait
pub struct SledTree {
    tree: sled::Tree,
}

fn backend(e: sled::Error) -> StorageDriverError {
    StorageDriverError::BackendSpecific(e.to_string())
}

fn boxed<'a, I>(iter: I) -> ScanIter<'a>
where
    I: Iterator<Item = sled::Result<(sled::IVec, sled::IVec)>> + 'a,
{
    Box::new(iter.map(|result| {
        result
            .map(|(k, v)| (k.to_vec(), v.to_vec()))
            .map_err(backend)
    }))
}

impl StorageTree for SledTree {
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.tree.insert(key, value).map_err(backend)?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.tree
            .get(key)
            .map_err(backend)
            .map(|opt| opt.map(|v| v.to_vec()))
    }

    fn remove(&self, key: &[u8]) -> StorageResult<()> {
        self.tree.remove(key).map_err(backend)?;
        Ok(())
    }

    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.tree.is_empty())
    }

    fn iter(&self) -> StorageResult<ScanIter<'_>> {
        Ok(boxed(self.tree.iter()))
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<ScanIter<'_>> {
        Ok(boxed(self.tree.scan_prefix(prefix)))
    }

    fn scan_range(&self, range: &KeyRange) -> StorageResult<ScanIter<'_>> {
        // sled panics on a range whose start exceeds its end
        if range.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }
        Ok(boxed(
            self.tree.range(range.start.as_slice()..range.end.as_slice()),
        ))
    }

    fn flush(&self) -> StorageResult<()> {
        self.tree.flush().map_err(backend)?;
        Ok(())
    }
}

impl StorageDriver for SledDriver {
    type Tree = Box<dyn StorageTree>;

    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        log::debug!("Opening sled storage at {}", path.display());
        let db = sled::open(path).map_err(backend)?;
        Ok(SledDriver { db })
    }

    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree> {
        let tree = self.db.open_tree(name).map_err(backend)?;
        Ok(Box::new(SledTree { tree }) as Box<dyn StorageTree>)
    }

    fn list_trees(&self) -> StorageResult<Vec<String>> {
        let tree_names = self
            .db
            .tree_names()
            .into_iter()
            .map(|name| String::from_utf8_lossy(&name).to_string())
            .collect();
        Ok(tree_names)
    }

    fn flush(&self) -> StorageResult<()> {
        self.db.flush().map_err(backend)?;
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Sled
    }
}
