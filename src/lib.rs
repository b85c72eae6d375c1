//! Valuestore: a single-slot, ownership-gated value store
//!
//! The store holds one bounded integer, one owning identity and the time of
//! the last value mutation. It changes only through a fixed set of validated
//! operations, each of which is either fully applied with exactly one change
//! event or fully rejected with no effect at all.
//!
//! # Core Concepts
//!
//! - **ValueStore**: the synchronous state machine and its invariants
//! - **Access**: two tiers, open to anyone or owner only
//! - **Events**: `ValueChanged` and `OwnershipTransferred`, ordered on an `EventLog`
//! - **Substrate**: the shell that serializes requests, stamps time and records events
//!
//! # Example
//!
//! ```rust
//! use valuestore::builder::SubstrateBuilder;
//! use valuestore::core::{Identity, StoreEvent};
//! use valuestore::StoreError;
//!
//! let owner = Identity::repeat_byte(1);
//! let anyone = Identity::repeat_byte(2);
//!
//! let substrate = SubstrateBuilder::new()
//!     .deployer(owner)
//!     .initial_value(42)
//!     .build()
//!     .unwrap();
//!
//! let record = substrate.increment(anyone).unwrap();
//! assert_eq!(
//!     record.event,
//!     StoreEvent::ValueChanged { old_value: 42, new_value: 43, updated_by: anyone }
//! );
//!
//! assert_eq!(
//!     substrate.set_value(anyone, 7),
//!     Err(StoreError::AccessDenied { caller: anyone })
//! );
//! ```

pub mod builder;
pub mod checkpoint;
pub mod clock;
pub mod config;
pub mod core;
pub mod error;
pub mod substrate;

// Re-export commonly used types
pub use crate::core::{Identity, Operation, StoreEvent, ValueStore, MAX_VALUE};
pub use error::StoreError;
pub use substrate::{Request, Substrate};
