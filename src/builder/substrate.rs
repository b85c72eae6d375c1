//! Builder for constructing substrates.

use crate::builder::error::BuildError;
use crate::clock::{Clock, SystemClock};
use crate::core::Identity;
use crate::substrate::Substrate;
use std::sync::Arc;

/// Builder for deploying a [`Substrate`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use valuestore::builder::SubstrateBuilder;
/// use valuestore::core::Identity;
///
/// let substrate = SubstrateBuilder::new()
///     .deployer(Identity::repeat_byte(1))
///     .initial_value(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(substrate.value(), 42);
/// ```
#[derive(Default)]
pub struct SubstrateBuilder {
    deployer: Option<Identity>,
    initial_value: Option<u64>,
    clock: Option<Arc<dyn Clock>>,
}

impl SubstrateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the constructing identity, which becomes the owner (required).
    pub fn deployer(mut self, deployer: Identity) -> Self {
        self.deployer = Some(deployer);
        self
    }

    /// Set the initial value (required).
    pub fn initial_value(mut self, value: u64) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// Use `clock` for commit timestamps. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Deploy the substrate.
    /// Returns an error if required fields are missing or construction is rejected.
    pub fn build(self) -> Result<Substrate, BuildError> {
        let deployer = self.deployer.ok_or(BuildError::MissingDeployer)?;
        let initial_value = self.initial_value.ok_or(BuildError::MissingInitialValue)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        Ok(Substrate::deploy(deployer, initial_value, clock)?)
    }
}
