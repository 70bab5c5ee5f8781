// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage-facing primitives
//!
//! This module provides:
//! - Unsigned byte ordering, hex rendering and key ranges for storage keys
//! - Value type system for relation properties
//! - Pluggable ordered key-value drivers (sled, memory)

pub mod bytes;
pub mod persistent;
pub mod value;

pub use bytes::{ByteKey, KeyRange};
pub use persistent::{
    create_storage_driver, BoxedStorageDriver, StorageDriver, StorageDriverError, StorageResult,
    StorageTree, StorageType,
};
pub use value::Value;
