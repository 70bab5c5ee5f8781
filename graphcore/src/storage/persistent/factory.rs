// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage driver factory

use super::traits::{StorageDriver, StorageTree};
use super::types::{StorageResult, StorageType};
use std::path::Path;

/// Boxed driver handed out by [`create_storage_driver`]
pub type BoxedStorageDriver = Box<dyn StorageDriver<Tree = Box<dyn StorageTree>>>;

/// Create a storage driver of the given type rooted at `path`.
///
/// The memory driver ignores `path`.
pub fn create_storage_driver<P: AsRef<Path>>(
    storage_type: StorageType,
    path: P,
) -> StorageResult<BoxedStorageDriver> {
    match storage_type {
        #[cfg(feature = "sled-backend")]
        StorageType::Sled => {
            use crate::storage::persistent::sled::SledDriver;
            let driver = SledDriver::open(path)?;
            Ok(Box::new(driver) as BoxedStorageDriver)
        }
        #[cfg(not(feature = "sled-backend"))]
        StorageType::Sled => Err(super::types::StorageDriverError::BackendSpecific(
            "sled backend not compiled in (enable the 'sled-backend' feature)".to_string(),
        )),
        StorageType::Memory => {
            use crate::storage::persistent::memory::MemoryStorageDriver;
            let driver = MemoryStorageDriver::open(path)?;
            Ok(Box::new(driver) as BoxedStorageDriver)
        }
    }
}
