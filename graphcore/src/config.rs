// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Core configuration

use crate::query::builder::DEFAULT_CONSTRAINT_CAPACITY;
use crate::storage::{create_storage_driver, BoxedStorageDriver, StorageDriverError, StorageType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageDriverError),
}

/// Configuration of a graph core instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Storage backend holding keys and the persisted schema
    pub storage_type: StorageType,

    /// Data directory; required for on-disk backends
    pub data_path: Option<PathBuf>,

    /// Initial capacity of a query's constraint list once allocated
    pub constraint_capacity: usize,

    /// Storage tree holding persisted relation types
    pub schema_tree: String,

    /// `env_logger` filter, e.g. `"graphcore=debug"`
    pub log_filter: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::Memory,
            data_path: None,
            constraint_capacity: DEFAULT_CONSTRAINT_CAPACITY,
            schema_tree: "schema".to_string(),
            log_filter: None,
        }
    }
}

impl CoreConfig {
    /// On-disk configuration rooted at `path`
    pub fn sled<P: AsRef<Path>>(path: P) -> Self {
        Self {
            storage_type: StorageType::Sled,
            data_path: Some(path.as_ref().to_path_buf()),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_type == StorageType::Sled && self.data_path.is_none() {
            return Err(ConfigError::Invalid(
                "data_path is required for the sled backend".to_string(),
            ));
        }
        if self.schema_tree.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "schema_tree must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Instantiate the configured storage driver
    pub fn open_storage(&self) -> Result<BoxedStorageDriver, ConfigError> {
        self.validate()?;
        let path = self.data_path.clone().unwrap_or_default();
        log::debug!("Opening {} storage at '{}'", self.storage_type, path.display());
        Ok(create_storage_driver(self.storage_type, path)?)
    }

    /// Install an `env_logger` logger using `log_filter`, falling back to
    /// `RUST_LOG`. Does nothing if a logger is already installed.
    pub fn init_logging(&self) {
        let mut builder = env_logger::Builder::from_default_env();
        if let Some(filter) = &self.log_filter {
            builder.parse_filters(filter);
        }
        let _ = builder.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.storage_type, StorageType::Memory);
        assert_eq!(config.constraint_capacity, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = CoreConfig::from_json_str(r#"{"constraint_capacity": 8}"#).unwrap();
        assert_eq!(config.constraint_capacity, 8);
        assert_eq!(config.schema_tree, "schema");

        let json = r#"{"storage_type": "sled", "data_path": "/tmp/g"}"#;
        let config = CoreConfig::from_json_str(json).unwrap();
        assert_eq!(config.storage_type, StorageType::Sled);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            CoreConfig::from_json_str(r#"{"storage_type": "sled"}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CoreConfig::from_json_str(r#"{"storage_type": "rocks"}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(CoreConfig::from_json_str(r#"{"schema_tree": " "}"#).is_err());
    }

    #[test]
    fn test_from_file_and_open_storage() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("core.json");
        std::fs::write(&file, r#"{"storage_type": "memory"}"#).unwrap();
        let config = CoreConfig::from_file(&file).unwrap();
        let driver = config.open_storage().unwrap();
        assert_eq!(driver.storage_type(), StorageType::Memory);
    }
}
