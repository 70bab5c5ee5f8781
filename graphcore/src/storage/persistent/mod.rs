// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ordered key-value storage backends
//!
//! ```text
//! SchemaRegistry / planner (encoded keys, KeyRange bounds)
//!     ↓
//! StorageDriver / StorageTree (ordered key-value abstraction)
//!     ↓
//! Concrete Implementations (Sled, Memory)
//! ```

pub mod factory;
pub mod traits;
pub mod types;

pub mod memory;
#[cfg(feature = "sled-backend")]
pub mod sled;

pub use factory::{create_storage_driver, BoxedStorageDriver};
pub use traits::{StorageDriver, StorageTree};
pub use types::{KeyValue, ScanIter, StorageDriverError, StorageResult, StorageType};
