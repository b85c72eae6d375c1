//! Core value store types and logic.
//!
//! This module contains the synchronous core of the store:
//! - Identities and the bounded value type
//! - The two-tier access model
//! - The `ValueStore` state machine and its operations
//! - Change events and the ordered event log
//!
//! Nothing in this module reads a clock, takes a lock or logs. Time is passed
//! in by the caller and events are returned rather than published.

mod access;
mod event;
mod identity;
mod operation;
mod store;
mod value;

pub use access::Access;
pub use event::{EventLog, EventRecord, StoreEvent};
pub use identity::{Identity, ParseIdentityError, IDENTITY_LEN};
pub use operation::Operation;
pub use store::{StorageInfo, ValueStore};
pub use value::{BoundedValue, MAX_VALUE};
