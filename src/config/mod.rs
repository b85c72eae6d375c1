//! Deployment configuration.
//!
//! A `StoreConfig` describes how a substrate is deployed. Validation uses
//! Stillwater's `Validation` so that every problem is reported in one pass
//! instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use valuestore::config::StoreConfig;
//!
//! let config = StoreConfig::from_json(r#"{
//!     "deployer": "0x1111111111111111111111111111111111111111",
//!     "initial_value": 42
//! }"#).unwrap();
//!
//! assert!(config.validate().is_success());
//! let substrate = config.builder().build().unwrap();
//! assert_eq!(substrate.value(), 42);
//! ```

use crate::builder::SubstrateBuilder;
use crate::core::{Identity, MAX_VALUE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Problems loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Problems with the values of a loaded configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("deployer must not be the zero identity")]
    ZeroDeployer,

    #[error("initial value {value} exceeds maximum {max}")]
    InitialValueTooLarge { value: u64, max: u64 },
}

/// Deployment parameters for a value store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Identity that deploys the store and becomes its first owner
    pub deployer: Identity,
    /// Value the store starts with
    pub initial_value: u64,
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check every field, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let deployer = if self.deployer.is_zero() {
            Validation::fail(ConfigViolation::ZeroDeployer)
        } else {
            Validation::success(())
        };

        let initial_value = if self.initial_value > MAX_VALUE {
            Validation::fail(ConfigViolation::InitialValueTooLarge {
                value: self.initial_value,
                max: MAX_VALUE,
            })
        } else {
            Validation::success(())
        };

        Validation::all_vec(vec![deployer, initial_value]).map(|_| ())
    }

    /// Builder pre-filled with this configuration.
    pub fn builder(&self) -> SubstrateBuilder {
        SubstrateBuilder::new()
            .deployer(self.deployer)
            .initial_value(self.initial_value)
    }
}
