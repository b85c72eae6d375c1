//! Mutating operations as data.

use super::access::Access;
use super::identity::Identity;
use serde::{Deserialize, Serialize};

/// A request to mutate the store, independent of who sends it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    SetValue(u64),
    Increment,
    Decrement,
    AddValue(u64),
    Reset,
    TransferOwnership(Identity),
}

impl Operation {
    /// Access tier required to run this operation.
    pub fn access(&self) -> Access {
        match self {
            Operation::SetValue(_) | Operation::Reset | Operation::TransferOwnership(_) => {
                Access::OwnerOnly
            }
            Operation::Increment | Operation::Decrement | Operation::AddValue(_) => Access::Anyone,
        }
    }

    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SetValue(_) => "setValue",
            Operation::Increment => "increment",
            Operation::Decrement => "decrement",
            Operation::AddValue(_) => "addValue",
            Operation::Reset => "reset",
            Operation::TransferOwnership(_) => "transferOwnership",
        }
    }
}
