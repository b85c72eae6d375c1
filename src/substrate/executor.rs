//! In-process execution substrate.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::clock::Clock;
use crate::core::{
    EventLog, EventRecord, Identity, Operation, StorageInfo, StoreEvent, ValueStore,
};
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// An operation together with the identity invoking it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub caller: Identity,
    pub operation: Operation,
}

impl Request {
    pub fn new(caller: Identity, operation: Operation) -> Self {
        Self { caller, operation }
    }
}

#[derive(Clone, Debug)]
struct Ledger {
    store: ValueStore,
    events: EventLog,
}

/// Serializes operations against one [`ValueStore`] and records their events.
///
/// Mutations hold the write lock across validate, mutate and emit, so each
/// request is applied all-or-nothing and in a single total order. Reads share
/// the read lock and only ever see committed state.
pub struct Substrate {
    ledger: RwLock<Ledger>,
    clock: Arc<dyn Clock>,
}

impl Substrate {
    /// Construct the store and record its construction event.
    ///
    /// No substrate exists if construction is rejected.
    pub fn deploy(
        deployer: Identity,
        initial_value: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let now = clock.now();
        let (store, event) = ValueStore::deploy(deployer, initial_value, now)?;

        let mut events = EventLog::new();
        events.append(event, now);

        info!(
            target: "valuestore::substrate",
            deployer = %deployer,
            initial_value,
            "value store deployed"
        );

        Ok(Self {
            ledger: RwLock::new(Ledger { store, events }),
            clock,
        })
    }

    /// Apply one request atomically, returning the committed event record.
    pub fn apply(&self, request: &Request) -> Result<EventRecord, StoreError> {
        let mut guard = self.ledger.write();
        let ledger = &mut *guard;
        // Records are stamped in commit order even if the clock steps back.
        let now = match ledger.events.last() {
            Some(last) => self.clock.now().max(last.timestamp),
            None => self.clock.now(),
        };

        let event = match ledger.store.apply(&request.caller, &request.operation, now) {
            Ok(event) => event,
            Err(e) => {
                debug!(
                    target: "valuestore::substrate",
                    operation = request.operation.name(),
                    caller = %request.caller,
                    error = %e,
                    "operation rejected"
                );
                return Err(e);
            }
        };

        if let StoreEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        } = &event
        {
            info!(
                target: "valuestore::substrate",
                previous_owner = %previous_owner,
                new_owner = %new_owner,
                "ownership transferred"
            );
        }

        let record = ledger.events.append(event, now);
        debug!(
            target: "valuestore::substrate",
            operation = request.operation.name(),
            caller = %request.caller,
            sequence = record.sequence,
            value = ledger.store.value(),
            "operation committed"
        );
        Ok(record)
    }

    pub fn set_value(&self, caller: Identity, value: u64) -> Result<EventRecord, StoreError> {
        self.apply(&Request::new(caller, Operation::SetValue(value)))
    }

    pub fn increment(&self, caller: Identity) -> Result<EventRecord, StoreError> {
        self.apply(&Request::new(caller, Operation::Increment))
    }

    pub fn decrement(&self, caller: Identity) -> Result<EventRecord, StoreError> {
        self.apply(&Request::new(caller, Operation::Decrement))
    }

    pub fn add_value(&self, caller: Identity, amount: u64) -> Result<EventRecord, StoreError> {
        self.apply(&Request::new(caller, Operation::AddValue(amount)))
    }

    pub fn reset(&self, caller: Identity) -> Result<EventRecord, StoreError> {
        self.apply(&Request::new(caller, Operation::Reset))
    }

    pub fn transfer_ownership(
        &self,
        caller: Identity,
        new_owner: Identity,
    ) -> Result<EventRecord, StoreError> {
        self.apply(&Request::new(caller, Operation::TransferOwnership(new_owner)))
    }

    pub fn value(&self) -> u64 {
        self.ledger.read().store.value()
    }

    pub fn owner(&self) -> Identity {
        *self.ledger.read().store.owner()
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.ledger.read().store.last_updated()
    }

    pub fn storage_info(&self) -> StorageInfo {
        self.ledger.read().store.storage_info()
    }

    /// Copy of the committed store state.
    pub fn snapshot(&self) -> ValueStore {
        self.ledger.read().store.clone()
    }

    /// All events recorded so far, in commit order.
    pub fn events(&self) -> Vec<EventRecord> {
        self.ledger.read().events.records().to_vec()
    }

    /// Events with `sequence >= from`, for consumers that poll the channel.
    pub fn events_since(&self, from: u64) -> Vec<EventRecord> {
        self.ledger.read().events.since(from).to_vec()
    }

    /// Capture store state and event log as one consistent checkpoint.
    pub fn checkpoint(&self) -> Checkpoint {
        let ledger = self.ledger.read();
        Checkpoint::new(ledger.store.clone(), ledger.events.clone())
    }

    /// Rebuild a substrate from a checkpoint after validating it.
    pub fn restore(checkpoint: Checkpoint, clock: Arc<dyn Clock>) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        info!(
            target: "valuestore::checkpoint",
            checkpoint_id = %checkpoint.id,
            value = checkpoint.store.value(),
            events = checkpoint.events.len(),
            "value store restored"
        );

        Ok(Self {
            ledger: RwLock::new(Ledger {
                store: checkpoint.store,
                events: checkpoint.events,
            }),
            clock,
        })
    }
}

impl fmt::Debug for Substrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ledger = self.ledger.read();
        f.debug_struct("Substrate")
            .field("store", &ledger.store)
            .field("events", &ledger.events.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Duration;
    use std::thread;

    fn owner() -> Identity {
        Identity::repeat_byte(0x01)
    }

    fn user() -> Identity {
        Identity::repeat_byte(0x02)
    }

    fn setup(initial: u64) -> (Substrate, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let substrate = Substrate::deploy(owner(), initial, clock.clone()).unwrap();
        (substrate, clock)
    }

    #[test]
    fn deploy_records_construction_event() {
        let (substrate, _) = setup(42);
        let events = substrate.events();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sequence, 0);
        assert_eq!(
            events[0].event,
            StoreEvent::ValueChanged {
                old_value: 0,
                new_value: 42,
                updated_by: owner(),
            }
        );
    }

    #[test]
    fn deploy_rejects_out_of_range() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let result = Substrate::deploy(owner(), 1_000_000, clock);
        assert!(matches!(result, Err(StoreError::ValueOutOfRange { .. })));
    }

    #[test]
    fn apply_records_event_with_commit_time() {
        let (substrate, clock) = setup(42);
        clock.advance(Duration::seconds(3));

        let record = substrate.increment(user()).unwrap();

        assert_eq!(record.sequence, 1);
        assert_eq!(record.timestamp, clock.now());
        assert_eq!(substrate.last_updated(), clock.now());
        assert_eq!(substrate.value(), 43);
    }

    #[test]
    fn record_timestamps_never_decrease() {
        let (substrate, clock) = setup(42);
        clock.advance(Duration::seconds(10));
        let first = substrate.increment(user()).unwrap();

        clock.set(first.timestamp - Duration::seconds(60));
        let second = substrate.transfer_ownership(owner(), user()).unwrap();
        let third = substrate.decrement(user()).unwrap();

        assert_eq!(second.timestamp, first.timestamp);
        assert_eq!(third.timestamp, first.timestamp);
        assert_eq!(substrate.last_updated(), third.timestamp);
        assert!(substrate.checkpoint().validate().is_ok());
    }

    #[test]
    fn rejected_request_records_nothing() {
        let (substrate, clock) = setup(42);
        let before = substrate.snapshot();
        clock.advance(Duration::seconds(3));

        let result = substrate.set_value(user(), 7);

        assert_eq!(result, Err(StoreError::AccessDenied { caller: user() }));
        assert_eq!(substrate.snapshot(), before);
        assert_eq!(substrate.events().len(), 1);
    }

    #[test]
    fn transfer_does_not_touch_last_updated() {
        let (substrate, clock) = setup(42);
        let deployed_at = substrate.last_updated();
        clock.advance(Duration::seconds(10));

        let record = substrate.transfer_ownership(owner(), user()).unwrap();

        assert_eq!(substrate.owner(), user());
        assert_eq!(substrate.last_updated(), deployed_at);
        assert_eq!(record.timestamp, clock.now());
    }

    #[test]
    fn events_since_returns_tail() {
        let (substrate, _) = setup(1);
        substrate.increment(user()).unwrap();
        substrate.decrement(user()).unwrap();

        let tail = substrate.events_since(1);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].sequence, 1);
        assert_eq!(tail[1].sequence, 2);
    }

    #[test]
    fn concurrent_increments_are_serialized() {
        let (substrate, _) = setup(0);
        let substrate = Arc::new(substrate);

        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let substrate = Arc::clone(&substrate);
                thread::spawn(move || {
                    let caller = Identity::repeat_byte(0x10 + i);
                    for _ in 0..100 {
                        substrate.increment(caller).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(substrate.value(), 800);

        let events = substrate.events();
        assert_eq!(events.len(), 801);
        for (i, record) in events.iter().enumerate() {
            assert_eq!(record.sequence, i as u64);
            if i > 0 {
                match record.event {
                    StoreEvent::ValueChanged {
                        old_value,
                        new_value,
                        ..
                    } => {
                        assert_eq!(old_value, i as u64 - 1);
                        assert_eq!(new_value, i as u64);
                    }
                    _ => panic!("Expected ValueChanged"),
                }
            }
        }
    }

    #[test]
    fn checkpoint_roundtrip_restores_state() {
        let (substrate, clock) = setup(42);
        substrate.add_value(user(), 8).unwrap();
        substrate.transfer_ownership(owner(), user()).unwrap();

        let checkpoint = substrate.checkpoint();
        let restored = Substrate::restore(checkpoint, clock).unwrap();

        assert_eq!(restored.snapshot(), substrate.snapshot());
        assert_eq!(restored.events(), substrate.events());

        let record = restored.increment(owner()).unwrap();
        assert_eq!(record.sequence, 3);
    }
}
