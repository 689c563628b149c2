//! Registry actor - owns the session store and processes commands one at a time.
//!
//! The actor is the single owner of session state. It receives commands via
//! an mpsc channel and applies them sequentially: a command's mutation and
//! reply send both complete before the next command is dequeued, which is
//! the only synchronization the registry needs.

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::RegistryError;

use super::command::RegistryCommand;
use super::store::SessionStore;

/// The sequential command loop behind [`SessionRegistry`].
///
/// Has exactly two states: Running from construction, and Closed once the
/// shutdown token fires or every handle is dropped. Closed is terminal.
///
/// [`SessionRegistry`]: super::SessionRegistry
pub(crate) struct RegistryActor {
    receiver: mpsc::UnboundedReceiver<RegistryCommand>,
    shutdown: CancellationToken,
    store: SessionStore,
}

impl RegistryActor {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<RegistryCommand>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            receiver,
            shutdown,
            store: SessionStore::new(),
        }
    }

    /// Runs the command loop. Entry point for the spawned actor task.
    pub async fn run(mut self) {
        info!("Session registry starting");

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                cmd = self.receiver.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
            }
        }

        info!(sessions = self.store.len(), "Session registry closed");
    }

    /// Applies one command and replies. Reply sends ignore errors: a caller
    /// that dropped its receiver gets nothing, and the actor moves on.
    fn handle_command(&mut self, cmd: RegistryCommand) {
        let now_ms = Utc::now().timestamp_millis();

        match cmd {
            RegistryCommand::Create {
                remote_addr,
                respond_to,
            } => {
                // Random v4 ids; collision probability treated as negligible
                let session_id = Uuid::new_v4().to_string();
                debug!(session_id = %session_id, remote_addr = %remote_addr, "Create session");
                self.store
                    .insert_new(session_id.clone(), remote_addr, now_ms);
                let _ = respond_to.send(session_id);
            }

            RegistryCommand::Destroy {
                session_id,
                respond_to,
            } => {
                let removed = self.store.remove(&session_id);
                debug!(session_id = %session_id, removed, "Destroy session");
                let _ = respond_to.send(());
            }

            RegistryCommand::Query {
                session_id,
                respond_to,
            } => {
                let _ = respond_to.send(self.store.get(&session_id).cloned());
            }

            RegistryCommand::CountTotal { respond_to } => {
                let _ = respond_to.send(self.store.len());
            }

            RegistryCommand::Ping {
                session_id,
                respond_to,
            } => {
                let result = if self.store.touch(&session_id, now_ms) {
                    Ok(())
                } else {
                    debug!(session_id = %session_id, "Ping for unknown session");
                    Err(RegistryError::SessionNotFound(session_id))
                };
                let _ = respond_to.send(result);
            }

            RegistryCommand::CountOnline { respond_to } => {
                let _ = respond_to.send(self.store.count_online(now_ms));
            }

            RegistryCommand::LogIn {
                session_id,
                remote_addr,
                respond_to,
            } => {
                debug!(session_id = %session_id, remote_addr = %remote_addr, "Log session in");
                self.store.log_in(&session_id, remote_addr, now_ms);
                let _ = respond_to.send(());
            }
        }
    }
}
