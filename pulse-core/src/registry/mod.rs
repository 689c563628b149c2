//! Serialized-actor session registry
//!
//! One background task owns the session map exclusively. All access goes
//! through typed commands on an mpsc channel, each carrying a dedicated
//! oneshot reply sender, so callers get linearizable reads and writes
//! without ever seeing a lock.

mod actor;
mod command;
mod handle;
mod store;

pub use handle::SessionRegistry;
pub use store::{ONLINE_WINDOW_MS, SessionRecord};
