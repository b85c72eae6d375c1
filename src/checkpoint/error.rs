//! Checkpoint error types.

use crate::core::Identity;
use thiserror::Error;

/// Errors raised while encoding, decoding or validating a checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The log hands ownership to the zero identity at `sequence`.
    #[error("event {sequence} names the zero identity as owner")]
    ZeroOwner { sequence: u64 },

    /// The log does not open with a `ValueChanged` from zero.
    #[error("checkpoint event log has no construction event")]
    MissingConstructionEvent,

    #[error("event sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },

    /// A `ValueChanged` does not start from the previous `new_value`.
    #[error("event {sequence} starts from value {found}, expected {expected}")]
    BrokenValueChain {
        sequence: u64,
        expected: u64,
        found: u64,
    },

    #[error("event {sequence} records value {value} above the maximum")]
    RecordedValueOutOfRange { sequence: u64, value: u64 },

    /// An `OwnershipTransferred` does not start from the running owner.
    #[error("event {sequence} transfers from {found}, expected owner {expected}")]
    BrokenOwnerChain {
        sequence: u64,
        expected: Identity,
        found: Identity,
    },

    /// Last recorded `ValueChanged` disagrees with the stored value.
    #[error("stored value {stored} does not match last recorded value {recorded}")]
    ValueMismatch { stored: u64, recorded: u64 },

    #[error("stored owner {stored} does not match last recorded owner {recorded}")]
    OwnerMismatch { stored: Identity, recorded: Identity },

    /// `last_updated` is earlier than the last recorded value change.
    #[error("last_updated precedes the last recorded value change")]
    StaleLastUpdated,
}
