//! Change notifications and the ordered event channel.
//!
//! Every committed mutation produces exactly one [`StoreEvent`]. The shell
//! places it on an [`EventLog`] as an [`EventRecord`] with a contiguous
//! sequence number.

use super::identity::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification emitted by a committed mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// The stored value changed (construction, set, increment, decrement,
    /// add or reset).
    ValueChanged {
        old_value: u64,
        new_value: u64,
        updated_by: Identity,
    },
    /// Ownership moved to a new identity.
    OwnershipTransferred {
        previous_owner: Identity,
        new_owner: Identity,
    },
}

impl StoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::ValueChanged { .. } => "ValueChanged",
            StoreEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}

/// An event as recorded on the channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position on the channel, starting at 0 for the construction event
    pub sequence: u64,
    /// Commit time of the operation that emitted the event
    pub timestamp: DateTime<Utc>,
    pub event: StoreEvent,
}

/// Append-only, ordered event channel.
///
/// # Example
///
/// ```rust
/// use valuestore::core::{EventLog, Identity, StoreEvent};
/// use chrono::Utc;
///
/// let mut log = EventLog::new();
/// let record = log.append(
///     StoreEvent::ValueChanged {
///         old_value: 0,
///         new_value: 42,
///         updated_by: Identity::repeat_byte(1),
///     },
///     Utc::now(),
/// );
///
/// assert_eq!(record.sequence, 0);
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append an event, returning the record as placed on the channel.
    pub fn append(&mut self, event: StoreEvent, timestamp: DateTime<Utc>) -> EventRecord {
        let record = EventRecord {
            sequence: self.next_sequence(),
            timestamp,
            event,
        };
        self.records.push(record.clone());
        record
    }

    /// Sequence number the next appended event will receive.
    pub fn next_sequence(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records with `sequence >= from`, in order.
    pub fn since(&self, from: u64) -> &[EventRecord] {
        let start = usize::try_from(from).unwrap_or(usize::MAX);
        self.records.get(start..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
