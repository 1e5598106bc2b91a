//! Backend event stream consumed by notification sinks.

use arrows_core::{CosmeticId, PlayerId};

/// Notifications published by the reconciler worker.
///
/// External sinks (e.g. the Telegram relay) subscribe via
/// [`crate::BackendHandle::subscribe_events`]. Publishing is best-effort;
/// having no subscribers is not an error.
#[derive(Clone, Debug)]
pub enum GameEvent {
    /// A previously unseen player was created.
    PlayerRegistered {
        player: PlayerId,
        display_name: String,
    },
    /// A score submission was reconciled.
    ScoreRecorded {
        player: PlayerId,
        level: u32,
        coins_earned: u64,
        best_level: u32,
        coins: u64,
    },
    /// A player changed their selected cosmetic.
    CosmeticSelected {
        player: PlayerId,
        cosmetic: CosmeticId,
    },
}
