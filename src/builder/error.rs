//! Build errors for the substrate builder.

use crate::error::StoreError;
use thiserror::Error;

/// Errors that can occur when building a substrate.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Deployer not specified. Call .deployer(identity) before .build()")]
    MissingDeployer,

    #[error("Initial value not specified. Call .initial_value(v) before .build()")]
    MissingInitialValue,

    #[error("Construction rejected: {0}")]
    Rejected(#[from] StoreError),
}
