//! Typed command protocol between registry callers and the actor

use tokio::sync::oneshot;

use crate::error::RegistryError;

use super::store::SessionRecord;

/// One request into the registry actor.
///
/// Each variant carries its own payload fields and a reply sender of the
/// operation's exact result type, so an operation can never be paired with
/// the wrong payload. Replies go over oneshot channels, whose sends never
/// block; an abandoned caller cannot stall the actor.
#[derive(Debug)]
pub(crate) enum RegistryCommand {
    /// Create a session under a fresh random id; replies with the id.
    Create {
        remote_addr: String,
        respond_to: oneshot::Sender<String>,
    },

    /// Remove a session. Unknown ids are a silent success.
    Destroy {
        session_id: String,
        respond_to: oneshot::Sender<()>,
    },

    /// Look up a session; `None` for unknown ids.
    Query {
        session_id: String,
        respond_to: oneshot::Sender<Option<SessionRecord>>,
    },

    /// Count all records.
    CountTotal { respond_to: oneshot::Sender<usize> },

    /// Refresh a session's last-contact time; errors on unknown ids.
    Ping {
        session_id: String,
        respond_to: oneshot::Sender<Result<(), RegistryError>>,
    },

    /// Count records heard from within the online window.
    CountOnline { respond_to: oneshot::Sender<usize> },

    /// Refresh a known session, or create one under this exact id.
    LogIn {
        session_id: String,
        remote_addr: String,
        respond_to: oneshot::Sender<()>,
    },
}
