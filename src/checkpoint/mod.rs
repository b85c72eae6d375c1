//! Durable snapshots of a value store and its event log.
//!
//! A checkpoint captures the three persisted store fields together with the
//! event channel so a substrate can be rebuilt after a restart. Checkpoints
//! are validated against the store invariants before they are restored.

use crate::core::{EventLog, Identity, StoreEvent, ValueStore, MAX_VALUE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a substrate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub store: ValueStore,

    pub events: EventLog,
}

impl Checkpoint {
    pub fn new(store: ValueStore, events: EventLog) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            store,
            events,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Check that the checkpoint describes a reachable store state.
    ///
    /// The value bound and the non-zero store owner are enforced while
    /// decoding. This replays the event log: every `ValueChanged` must start
    /// from the value the previous one left, every transfer must start from
    /// the running owner and name a non-zero successor, and the replayed
    /// value and owner must match the stored ones.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let records = self.events.records();
        let mut owner = match records.first().map(|r| &r.event) {
            Some(StoreEvent::ValueChanged {
                old_value: 0,
                updated_by,
                ..
            }) => *updated_by,
            _ => return Err(CheckpointError::MissingConstructionEvent),
        };
        if owner.is_zero() {
            return Err(CheckpointError::ZeroOwner { sequence: 0 });
        }

        let mut value = 0;
        let mut value_changed_at = None;
        for (expected, record) in (0u64..).zip(records) {
            if record.sequence != expected {
                return Err(CheckpointError::SequenceGap {
                    expected,
                    found: record.sequence,
                });
            }
            match &record.event {
                StoreEvent::ValueChanged {
                    old_value,
                    new_value,
                    ..
                } => {
                    if *old_value != value {
                        return Err(CheckpointError::BrokenValueChain {
                            sequence: record.sequence,
                            expected: value,
                            found: *old_value,
                        });
                    }
                    if *new_value > MAX_VALUE {
                        return Err(CheckpointError::RecordedValueOutOfRange {
                            sequence: record.sequence,
                            value: *new_value,
                        });
                    }
                    value = *new_value;
                    value_changed_at = Some(record.timestamp);
                }
                StoreEvent::OwnershipTransferred {
                    previous_owner,
                    new_owner,
                } => {
                    if *previous_owner != owner {
                        return Err(CheckpointError::BrokenOwnerChain {
                            sequence: record.sequence,
                            expected: owner,
                            found: *previous_owner,
                        });
                    }
                    if new_owner.is_zero() {
                        return Err(CheckpointError::ZeroOwner {
                            sequence: record.sequence,
                        });
                    }
                    owner = *new_owner;
                }
            }
        }

        if value != self.store.value() {
            return Err(CheckpointError::ValueMismatch {
                stored: self.store.value(),
                recorded: value,
            });
        }
        if owner != *self.store.owner() {
            return Err(CheckpointError::OwnerMismatch {
                stored: *self.store.owner(),
                recorded: owner,
            });
        }
        if value_changed_at.is_some_and(|at| self.store.last_updated() < at) {
            return Err(CheckpointError::StaleLastUpdated);
        }

        Ok(())
    }

    /// Owner recorded in the checkpointed store.
    pub fn owner(&self) -> Identity {
        *self.store.owner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn owner() -> Identity {
        Identity::repeat_byte(0x11)
    }

    fn user() -> Identity {
        Identity::repeat_byte(0x22)
    }

    fn sample() -> Checkpoint {
        let now = Utc::now();
        let (mut store, event) = ValueStore::deploy(owner(), 42, now).unwrap();
        let mut events = EventLog::new();
        events.append(event, now);

        let later = now + Duration::seconds(1);
        let event = store.increment(&user(), later).unwrap();
        events.append(event, later);

        let event = store.transfer_ownership(&owner(), user()).unwrap();
        events.append(event, later);

        Checkpoint::new(store, events)
    }

    #[test]
    fn new_checkpoint_is_valid() {
        let checkpoint = sample();
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert!(Uuid::parse_str(&checkpoint.id).is_ok());
        assert!(checkpoint.validate().is_ok());
        assert_eq!(checkpoint.owner(), user());
    }

    #[test]
    fn json_roundtrip() {
        let checkpoint = sample();
        let json = checkpoint.to_json().unwrap();
        let restored = Checkpoint::from_json(&json).unwrap();

        assert_eq!(restored, checkpoint);
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn binary_roundtrip() {
        let checkpoint = sample();
        let bytes = checkpoint.to_bytes().unwrap();
        let restored = Checkpoint::from_bytes(&bytes).unwrap();

        assert_eq!(restored, checkpoint);
    }

    #[test]
    fn decoding_rejects_value_above_max() {
        let checkpoint = sample();
        let json = checkpoint.to_json().unwrap();
        let tampered = json.replace("\"value\": 43", "\"value\": 1000000");

        assert_ne!(json, tampered);
        assert!(matches!(
            Checkpoint::from_json(&tampered),
            Err(CheckpointError::Json(_))
        ));
    }

    #[test]
    fn validate_rejects_unknown_version() {
        let mut checkpoint = sample();
        checkpoint.version = 99;

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: CHECKPOINT_VERSION
            })
        ));
    }

    #[test]
    fn validate_rejects_empty_log() {
        let mut checkpoint = sample();
        checkpoint.events = EventLog::new();

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::MissingConstructionEvent)
        ));
    }

    #[test]
    fn validate_rejects_value_mismatch() {
        let mut checkpoint = sample();
        let now = checkpoint.store.last_updated();
        checkpoint.store.set_value(&user(), 7, now).unwrap();

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::ValueMismatch {
                stored: 7,
                recorded: 43
            })
        ));
    }

    #[test]
    fn validate_rejects_owner_mismatch() {
        let mut checkpoint = sample();
        checkpoint
            .store
            .transfer_ownership(&user(), Identity::repeat_byte(0x33))
            .unwrap();

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::OwnerMismatch { .. })
        ));
    }

    #[test]
    fn validate_rejects_sequence_gap() {
        let checkpoint = sample();
        let json = checkpoint.to_json().unwrap();
        let tampered = json.replace("\"sequence\": 2", "\"sequence\": 5");
        let tampered = Checkpoint::from_json(&tampered).unwrap();

        assert!(matches!(
            tampered.validate(),
            Err(CheckpointError::SequenceGap {
                expected: 2,
                found: 5
            })
        ));
    }

    fn with_events(events: Vec<StoreEvent>) -> Checkpoint {
        let mut checkpoint = sample();
        let at = checkpoint.store.last_updated();
        let mut log = EventLog::new();
        for event in events {
            log.append(event, at);
        }
        checkpoint.events = log;
        checkpoint
    }

    fn construction() -> StoreEvent {
        StoreEvent::ValueChanged {
            old_value: 0,
            new_value: 42,
            updated_by: owner(),
        }
    }

    #[test]
    fn validate_rejects_forged_old_value() {
        let checkpoint = with_events(vec![
            construction(),
            StoreEvent::ValueChanged {
                old_value: 500,
                new_value: 43,
                updated_by: user(),
            },
        ]);

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::BrokenValueChain {
                sequence: 1,
                expected: 42,
                found: 500
            })
        ));
    }

    #[test]
    fn validate_rejects_recorded_value_above_max() {
        let checkpoint = with_events(vec![
            construction(),
            StoreEvent::ValueChanged {
                old_value: 42,
                new_value: MAX_VALUE + 1,
                updated_by: user(),
            },
        ]);

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::RecordedValueOutOfRange { sequence: 1, .. })
        ));
    }

    #[test]
    fn validate_rejects_transfer_from_wrong_owner() {
        let checkpoint = with_events(vec![
            construction(),
            StoreEvent::OwnershipTransferred {
                previous_owner: Identity::repeat_byte(0x33),
                new_owner: user(),
            },
        ]);

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::BrokenOwnerChain { sequence: 1, .. })
        ));
    }

    #[test]
    fn validate_rejects_transfer_to_zero() {
        let checkpoint = with_events(vec![
            construction(),
            StoreEvent::OwnershipTransferred {
                previous_owner: owner(),
                new_owner: Identity::ZERO,
            },
        ]);

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::ZeroOwner { sequence: 1 })
        ));
    }

    #[test]
    fn validate_rejects_zero_deployer_in_log() {
        let checkpoint = with_events(vec![StoreEvent::ValueChanged {
            old_value: 0,
            new_value: 42,
            updated_by: Identity::ZERO,
        }]);

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::ZeroOwner { sequence: 0 })
        ));
    }

    #[test]
    fn decoding_rejects_zero_store_owner() {
        let checkpoint = sample();
        let json = checkpoint.to_json().unwrap();
        let owner_field = format!("\"owner\": \"{}\"", user());
        let tampered = json.replace(&owner_field, &format!("\"owner\": \"{}\"", Identity::ZERO));

        assert_ne!(json, tampered);
        assert!(matches!(
            Checkpoint::from_json(&tampered),
            Err(CheckpointError::Json(_))
        ));
    }
}
