//! Unified error types surfaced by the backend API.
//!
//! Wraps failures from the reconciliation rules, the repository, and worker
//! coordination so hosts can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

pub use arrows_core::ReconcileError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("reconciler command channel closed")]
    CommandChannelClosed,

    #[error("reconciler reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("reconciler worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a document repository before building")]
    MissingRepository,
}

impl RuntimeError {
    /// True for errors caused by the request itself rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Reconcile(_))
    }
}
