//! Local application state: session, preferences and recovery slices, the
//! store that holds them, and the synchronizer that mirrors server-confirmed
//! data into it.
//!
//! Each slice moves between two states only, `Default` and `Populated`. A
//! successful commit populates it, a logout or any rejected commit returns it to
//! `Default`. When two requests race, whichever commit runs last wins; callers
//! that need ordering must serialize their requests.

mod coerce;
mod store;
mod sync;
mod types;

pub use coerce::coerce_boolean;
pub use store::{MemoryStore, StateStore};
pub use sync::Synchronizer;
pub use types::{AccessLevel, AccountRecovery, Preferences, UserSession};
