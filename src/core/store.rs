//! The value store state machine.
//!
//! `ValueStore` holds one bounded integer, its owner and the time of the last
//! value mutation. Each mutator validates everything it needs before writing
//! anything, so a rejected call leaves the store byte-for-byte unchanged and
//! emits nothing.

use super::event::StoreEvent;
use super::identity::Identity;
use super::operation::Operation;
use super::value::BoundedValue;
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only view returned by [`ValueStore::storage_info`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub value: u64,
    pub owner: Identity,
    pub last_updated: DateTime<Utc>,
}

/// Single-slot, ownership-gated value store.
///
/// Mutators take the caller identity and the commit time supplied by the
/// execution substrate, and return the one event the mutation emits.
///
/// # Example
///
/// ```rust
/// use valuestore::core::{Identity, StoreEvent, ValueStore};
/// use chrono::Utc;
///
/// let deployer = Identity::repeat_byte(1);
/// let (mut store, event) = ValueStore::deploy(deployer, 42, Utc::now()).unwrap();
///
/// assert_eq!(store.value(), 42);
/// assert_eq!(
///     event,
///     StoreEvent::ValueChanged { old_value: 0, new_value: 42, updated_by: deployer }
/// );
///
/// let anyone = Identity::repeat_byte(2);
/// store.increment(&anyone, Utc::now()).unwrap();
/// assert_eq!(store.value(), 43);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredFields")]
pub struct ValueStore {
    value: BoundedValue,
    owner: Identity,
    last_updated: DateTime<Utc>,
}

// Wire shape of `ValueStore` before the owner is checked.
#[derive(Deserialize)]
struct StoredFields {
    value: BoundedValue,
    owner: Identity,
    last_updated: DateTime<Utc>,
}

impl TryFrom<StoredFields> for ValueStore {
    type Error = StoreError;

    fn try_from(fields: StoredFields) -> Result<Self, Self::Error> {
        if fields.owner.is_zero() {
            return Err(StoreError::InvalidTarget);
        }
        Ok(ValueStore {
            value: fields.value,
            owner: fields.owner,
            last_updated: fields.last_updated,
        })
    }
}

impl ValueStore {
    /// Construct the store with `deployer` as owner.
    ///
    /// Fails without producing an instance if `initial_value` exceeds
    /// `MAX_VALUE` or `deployer` is the zero identity.
    pub fn deploy(
        deployer: Identity,
        initial_value: u64,
        now: DateTime<Utc>,
    ) -> Result<(Self, StoreEvent), StoreError> {
        let value = BoundedValue::new(initial_value)?;
        if deployer.is_zero() {
            return Err(StoreError::InvalidTarget);
        }

        let store = ValueStore {
            value,
            owner: deployer,
            last_updated: now,
        };
        let event = StoreEvent::ValueChanged {
            old_value: 0,
            new_value: value.get(),
            updated_by: deployer,
        };
        Ok((store, event))
    }

    pub fn value(&self) -> u64 {
        self.value.get()
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn storage_info(&self) -> StorageInfo {
        StorageInfo {
            value: self.value.get(),
            owner: self.owner,
            last_updated: self.last_updated,
        }
    }

    /// Owner only. Replace the value with `new_value`.
    pub fn set_value(
        &mut self,
        caller: &Identity,
        new_value: u64,
        now: DateTime<Utc>,
    ) -> Result<StoreEvent, StoreError> {
        self.apply(caller, &Operation::SetValue(new_value), now)
    }

    pub fn increment(
        &mut self,
        caller: &Identity,
        now: DateTime<Utc>,
    ) -> Result<StoreEvent, StoreError> {
        self.apply(caller, &Operation::Increment, now)
    }

    pub fn decrement(
        &mut self,
        caller: &Identity,
        now: DateTime<Utc>,
    ) -> Result<StoreEvent, StoreError> {
        self.apply(caller, &Operation::Decrement, now)
    }

    /// Add a non-negative `amount`; rejected if the sum exceeds `MAX_VALUE`.
    pub fn add_value(
        &mut self,
        caller: &Identity,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Result<StoreEvent, StoreError> {
        self.apply(caller, &Operation::AddValue(amount), now)
    }

    /// Owner only. Set the value to zero.
    pub fn reset(
        &mut self,
        caller: &Identity,
        now: DateTime<Utc>,
    ) -> Result<StoreEvent, StoreError> {
        self.apply(caller, &Operation::Reset, now)
    }

    /// Owner only. Hand ownership to `new_owner`.
    ///
    /// Leaves the value and `last_updated` untouched.
    pub fn transfer_ownership(
        &mut self,
        caller: &Identity,
        new_owner: Identity,
    ) -> Result<StoreEvent, StoreError> {
        let unchanged = self.last_updated;
        self.apply(caller, &Operation::TransferOwnership(new_owner), unchanged)
    }

    /// Run `operation` on behalf of `caller`.
    ///
    /// The caller is authorized against [`Operation::access`] before any
    /// argument is looked at, so a non-owner always sees `AccessDenied`.
    pub fn apply(
        &mut self,
        caller: &Identity,
        operation: &Operation,
        now: DateTime<Utc>,
    ) -> Result<StoreEvent, StoreError> {
        operation.access().authorize(caller, &self.owner)?;

        let next = match operation {
            Operation::SetValue(v) => BoundedValue::new(*v)?,
            Operation::Increment => self.value.checked_add(1)?,
            Operation::Decrement => self.value.checked_sub_one()?,
            Operation::AddValue(amount) => self.value.checked_add(*amount)?,
            Operation::Reset => BoundedValue::ZERO,
            Operation::TransferOwnership(new_owner) => {
                return self.commit_owner(*new_owner);
            }
        };
        Ok(self.commit_value(caller, next, now))
    }

    // All checks have passed by the time this runs; it cannot fail.
    fn commit_value(
        &mut self,
        caller: &Identity,
        next: BoundedValue,
        now: DateTime<Utc>,
    ) -> StoreEvent {
        let old = std::mem::replace(&mut self.value, next);
        self.last_updated = self.last_updated.max(now);
        StoreEvent::ValueChanged {
            old_value: old.get(),
            new_value: next.get(),
            updated_by: *caller,
        }
    }

    fn commit_owner(&mut self, new_owner: Identity) -> Result<StoreEvent, StoreError> {
        if new_owner.is_zero() {
            return Err(StoreError::InvalidTarget);
        }
        if new_owner == self.owner {
            return Err(StoreError::AlreadyOwner { owner: new_owner });
        }

        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        Ok(StoreEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        })
    }
}
