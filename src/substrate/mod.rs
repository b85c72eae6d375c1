//! Execution substrate around the core store.
//!
//! This is the imperative shell: it reads the clock, serializes access with
//! a single lock, records events on the channel and logs what happened.
//!
//! # Key Concepts
//!
//! - **Requests**: an operation paired with the caller identity
//! - **Substrate**: applies requests one at a time, all-or-nothing
//! - **Effects**: Stillwater effects for composing store interactions

mod effect;
mod executor;

pub use effect::{inspect, submit, SubstrateEnv};
pub use executor::{Request, Substrate};
