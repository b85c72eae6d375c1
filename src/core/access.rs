//! Access tiers for store operations.
//!
//! Every operation is either open to any caller or restricted to the
//! current owner. There is no role hierarchy beyond that.

use super::identity::Identity;
use crate::error::StoreError;

/// Who may invoke an operation.
///
/// `Anyone` performs no identity check; operations in this tier are only
/// protected by the value bound. `OwnerOnly` requires the caller to be the
/// current owner.
///
/// # Example
///
/// ```rust
/// use valuestore::core::{Access, Identity};
///
/// let owner = Identity::repeat_byte(1);
/// let other = Identity::repeat_byte(2);
///
/// assert!(Access::Anyone.authorize(&other, &owner).is_ok());
/// assert!(Access::OwnerOnly.authorize(&owner, &owner).is_ok());
/// assert!(Access::OwnerOnly.authorize(&other, &owner).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Anyone,
    OwnerOnly,
}

impl Access {
    /// Check whether `caller` may act given the current `owner`.
    pub fn authorize(self, caller: &Identity, owner: &Identity) -> Result<(), StoreError> {
        match self {
            Access::Anyone => Ok(()),
            Access::OwnerOnly if caller == owner => Ok(()),
            Access::OwnerOnly => Err(StoreError::AccessDenied { caller: *caller }),
        }
    }
}
