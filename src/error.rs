//! Errors returned by value store operations.

use crate::core::Identity;
use thiserror::Error;

/// Reasons an operation is rejected.
///
/// A rejected operation leaves the store exactly as it was: no field is
/// written and no event is emitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Caller is not the owner on an owner-only operation.
    #[error("Not the owner (caller: {caller})")]
    AccessDenied { caller: Identity },

    /// The resulting value would exceed `MAX_VALUE`.
    #[error("Value too large (attempted: {attempted})")]
    ValueOutOfRange { attempted: u128 },

    #[error("Cannot decrement below zero")]
    Underflow,

    /// Ownership target (or deployer) is the zero identity.
    #[error("Invalid address")]
    InvalidTarget,

    #[error("Already the owner ({owner})")]
    AlreadyOwner { owner: Identity },
}
