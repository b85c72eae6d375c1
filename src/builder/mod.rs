//! Builder API for deploying a substrate.

pub mod error;
pub mod substrate;

pub use error::BuildError;
pub use substrate::SubstrateBuilder;
