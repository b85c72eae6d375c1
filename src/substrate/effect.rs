//! Store interactions as composable effects.
//!
//! These wrap [`Substrate`] calls in Stillwater effects whose environment is
//! a shared substrate handle. Nothing runs until the effect is run against
//! an environment.

use crate::core::{EventRecord, StorageInfo};
use crate::error::StoreError;
use crate::substrate::executor::{Request, Substrate};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Shared handle the effects run against.
pub type SubstrateEnv = Arc<Substrate>;

/// Effect that applies `request` when run.
pub fn submit(request: Request) -> BoxedEffect<EventRecord, StoreError, SubstrateEnv> {
    from_fn(move |substrate: &SubstrateEnv| substrate.apply(&request)).boxed()
}

/// Effect that reads the current storage info.
pub fn inspect() -> BoxedEffect<StorageInfo, StoreError, SubstrateEnv> {
    from_fn(|substrate: &SubstrateEnv| Ok(substrate.storage_info())).boxed()
}
