//! Persistence and orchestration around the Arrows document.
//!
//! The runtime owns the background reconciler worker, wires command/event
//! channels, and exposes [`BackendHandle`] as the cloneable façade for the
//! routing layer and other in-process clients.
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod workers;

pub use api::{BackendHandle, LeaderboardPage, Result, RuntimeError};
pub use events::GameEvent;
pub use repository::{
    DocumentRepository, InMemoryRepository, JsonFileRepository, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
