//! The bounded integer held by the store.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the stored value, inclusive.
pub const MAX_VALUE: u64 = 999_999;

/// An unsigned integer in `0..=MAX_VALUE`.
///
/// Every constructor and arithmetic helper checks the bound, so a
/// `BoundedValue` is in range by construction. Deserialization goes through
/// the same check.
///
/// # Example
///
/// ```rust
/// use valuestore::core::{BoundedValue, MAX_VALUE};
///
/// let v = BoundedValue::new(41).unwrap();
/// assert_eq!(v.checked_add(1).unwrap().get(), 42);
/// assert!(BoundedValue::new(MAX_VALUE + 1).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct BoundedValue(u64);

impl BoundedValue {
    pub const ZERO: BoundedValue = BoundedValue(0);
    pub const MAX: BoundedValue = BoundedValue(MAX_VALUE);

    /// Check `value` against `MAX_VALUE`.
    pub fn new(value: u64) -> Result<Self, StoreError> {
        if value > MAX_VALUE {
            return Err(StoreError::ValueOutOfRange {
                attempted: u128::from(value),
            });
        }
        Ok(BoundedValue(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Add `amount`, rejecting any sum above `MAX_VALUE`.
    ///
    /// The sum is computed in `u128`, so even `u64::MAX` reports the exact
    /// attempted value rather than wrapping.
    pub fn checked_add(self, amount: u64) -> Result<Self, StoreError> {
        let sum = u128::from(self.0) + u128::from(amount);
        if sum > u128::from(MAX_VALUE) {
            return Err(StoreError::ValueOutOfRange { attempted: sum });
        }
        Ok(BoundedValue(self.0 + amount))
    }

    pub fn checked_sub_one(self) -> Result<Self, StoreError> {
        self.0
            .checked_sub(1)
            .map(BoundedValue)
            .ok_or(StoreError::Underflow)
    }
}

impl TryFrom<u64> for BoundedValue {
    type Error = StoreError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        BoundedValue::new(value)
    }
}

impl From<BoundedValue> for u64 {
    fn from(value: BoundedValue) -> Self {
        value.0
    }
}

impl fmt::Display for BoundedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
