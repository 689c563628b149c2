//! pulse-core: Core library for the Pulse liveness registry
//!
//! This crate provides the serialized-actor session store:
//!
//! - **Session registry** - [`SessionRegistry`] handle backed by a single
//!   actor task that owns all session state exclusively
//! - **Session records** - [`SessionRecord`] per known session identifier,
//!   with last-contact tracking for online counting
//! - **Error types** - [`RegistryError`] for registry failures
//!
//! # Quick Start
//!
//! ```no_run
//! use pulse_core::SessionRegistry;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pulse_core::RegistryError> {
//!     let registry = SessionRegistry::start();
//!
//!     let session_id = registry.create("1.2.3.4:5678").await?;
//!     registry.ping(&session_id).await?;
//!     println!("online: {}", registry.count_online().await?);
//!
//!     registry.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! callers                        actor task
//! ┌────────────────┐  command   ┌──────────────────────┐
//! │ SessionRegistry│ ─────────▶ │ RegistryActor        │
//! │ (cloneable)    │  channel   │  ┌────────────────┐  │
//! │                │ ◀───────── │  │  SessionStore  │  │
//! └────────────────┘  oneshot   │  └────────────────┘  │
//!                     replies   └──────────────────────┘
//! ```
//!
//! Commands are applied one at a time in dequeue order, so every operation
//! is atomic with respect to every other without any locks.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{ONLINE_WINDOW_MS, SessionRecord, SessionRegistry};
