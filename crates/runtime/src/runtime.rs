//! High-level runtime orchestrator.
//!
//! The runtime owns the reconciler worker, wires command/event channels, and
//! exposes a builder-based API for hosts to construct the backend.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use arrows_core::GameConfig;

use crate::api::{BackendHandle, Result, RuntimeError};
use crate::events::GameEvent;
use crate::repository::DocumentRepository;
use crate::workers::{Command, ReconcilerWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Backend runtime owning the worker task.
///
/// [`BackendHandle`] provides a cloneable façade for clients.
#[derive(Debug)]
pub struct Runtime {
    handle: BackendHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> BackendHandle {
        self.handle.clone()
    }

    /// Shutdown gracefully: drop the handle and join the worker.
    ///
    /// The worker exits once every handle clone is gone.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    repository: Option<Box<dyn DocumentRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required document repository.
    pub fn repository(mut self, repository: impl DocumentRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Build the runtime and spawn the worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let repository = self.repository.ok_or(RuntimeError::MissingRepository)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<GameEvent>(self.config.event_buffer_size);

        let handle = BackendHandle::new(command_tx, event_tx.clone());

        let worker = ReconcilerWorker::new(repository, self.config.game, command_rx, event_tx);
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
