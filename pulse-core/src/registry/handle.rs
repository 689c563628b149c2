//! Client-facing handle for the session registry

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::error::RegistryError;

use super::actor::RegistryActor;
use super::command::RegistryCommand;
use super::store::SessionRecord;

/// Cloneable handle to the session registry actor.
///
/// Every method is a full round trip: submit a typed command, then await
/// the dedicated oneshot reply. Callers never see the session map itself,
/// so every operation is atomic with respect to every other.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sender: mpsc::UnboundedSender<RegistryCommand>,
    shutdown: CancellationToken,
}

impl SessionRegistry {
    /// Spawn the registry actor and return a ready-to-use handle.
    pub fn start() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let actor = RegistryActor::new(receiver, shutdown.clone());
        tokio::spawn(actor.run());

        Self { sender, shutdown }
    }

    /// Create a session for `remote_addr`; returns the new session id.
    pub async fn create(&self, remote_addr: impl Into<String>) -> Result<String, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.submit(
            RegistryCommand::Create {
                remote_addr: remote_addr.into(),
                respond_to,
            },
            response,
        )
        .await
    }

    /// Remove a session. Succeeds silently for unknown ids.
    pub async fn destroy(&self, session_id: &str) -> Result<(), RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.submit(
            RegistryCommand::Destroy {
                session_id: session_id.to_string(),
                respond_to,
            },
            response,
        )
        .await
    }

    /// Look up a session record; `None` for unknown ids.
    pub async fn query(&self, session_id: &str) -> Result<Option<SessionRecord>, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.submit(
            RegistryCommand::Query {
                session_id: session_id.to_string(),
                respond_to,
            },
            response,
        )
        .await
    }

    /// Count all known sessions.
    pub async fn count_total(&self) -> Result<usize, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.submit(RegistryCommand::CountTotal { respond_to }, response)
            .await
    }

    /// Mark a session alive now. Errors with
    /// [`RegistryError::SessionNotFound`] for unknown ids.
    pub async fn ping(&self, session_id: &str) -> Result<(), RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.submit(
            RegistryCommand::Ping {
                session_id: session_id.to_string(),
                respond_to,
            },
            response,
        )
        .await?
    }

    /// Count sessions heard from within the last [`ONLINE_WINDOW_MS`].
    ///
    /// [`ONLINE_WINDOW_MS`]: super::ONLINE_WINDOW_MS
    pub async fn count_online(&self) -> Result<usize, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.submit(RegistryCommand::CountOnline { respond_to }, response)
            .await
    }

    /// Log a returning session in: refresh its address and last-contact
    /// time, or create a record under `session_id` if it is unknown.
    pub async fn log_in(
        &self,
        session_id: &str,
        remote_addr: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.submit(
            RegistryCommand::LogIn {
                session_id: session_id.to_string(),
                remote_addr: remote_addr.into(),
                respond_to,
            },
            response,
        )
        .await
    }

    /// Signal the actor to stop. Idempotent; calling it again is a no-op.
    ///
    /// Requests submitted after shutdown fail with [`RegistryError::Closed`]
    /// rather than hanging.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// True once shutdown has been signalled.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Send a command and await its reply. Both the send and the receive
    /// fail with [`RegistryError::Closed`] once the actor is gone.
    async fn submit<T>(
        &self,
        cmd: RegistryCommand,
        response: oneshot::Receiver<T>,
    ) -> Result<T, RegistryError> {
        self.sender.send(cmd).map_err(|_| RegistryError::Closed)?;
        response.await.map_err(|_| RegistryError::Closed)
    }
}
