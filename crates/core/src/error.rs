//! Errors raised while reconciling inbound events against the document.

use thiserror::Error;

use crate::state::{CosmeticId, PlayerId};

/// Validation failures surfaced by [`crate::reconcile::Reconciler`].
///
/// Every variant is rejected before any mutation is committed, so a failed
/// reconciliation never leaves the document half-updated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// No player identity supplied; rejected before touching the store.
    #[error("no player id supplied")]
    MissingIdentity,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("cosmetic {cosmetic} is not unlocked for player {player}")]
    CosmeticNotUnlocked {
        player: PlayerId,
        cosmetic: CosmeticId,
    },
}
