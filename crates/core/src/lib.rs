//! Deterministic player-progress and leaderboard logic for the Arrows backend.
//!
//! `arrows-core` defines the canonical merge rules (player store, leaderboard
//! ratchet, display-name derivation) and exposes pure APIs reused by the
//! runtime and offline tools. All mutation of the persisted [`Document`]
//! flows through [`reconcile::Reconciler`]; the crate itself performs no I/O
//! and never reads a clock — callers supply timestamps.
pub mod config;
pub mod error;
pub mod identity;
pub mod reconcile;
pub mod state;

pub use config::{GameConfig, LastActivePolicy};
pub use error::ReconcileError;
pub use identity::derive_display_name;
pub use reconcile::{
    LoginRequest, PlayerProfile, Reconciler, ScoreOutcome, ScoreSubmission,
};
pub use state::{
    Cosmetic, CosmeticCatalog, CosmeticId, DEFAULT_COSMETIC_ID, Document, Leaderboard,
    LeaderboardEntry, PlayerId, PlayerRecord, Players, RankedEntry, StatsSnapshot, Timestamp,
};
