//! The reconciliation engine: the only mutator of the [`Document`].
//!
//! Every inbound event flows through [`Reconciler`], which validates input,
//! applies the player-store and leaderboard merge rules, and produces the
//! caller-facing view of the result. Callers hand in a working copy of the
//! document and commit it only when the operation returns `Ok`, so a failed
//! operation never leaves persisted state half-updated.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::ReconcileError;
use crate::identity::derive_display_name;
use crate::state::{CosmeticId, Document, PlayerId, PlayerRecord, Timestamp};

/// Inbound login (or first-contact) event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub player_id: PlayerId,
    pub handle: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Inbound score-submission event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub player_id: PlayerId,
    /// Preferred over the stored display name when present and non-empty.
    pub display_name: Option<String>,
    pub level: u32,
    pub coins_earned: u64,
}

/// Public view of a player record returned to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub display_name: String,
    pub coins: u64,
    pub best_level: u32,
    pub cosmetics: Vec<CosmeticId>,
    pub selected_cosmetic: CosmeticId,
    pub created_at: Timestamp,
}

impl PlayerProfile {
    fn from_record(id: &PlayerId, record: &PlayerRecord) -> Self {
        Self {
            id: id.clone(),
            display_name: record.display_name.clone(),
            coins: record.coins,
            best_level: record.best_level,
            cosmetics: record.cosmetics.iter().cloned().collect(),
            selected_cosmetic: record.selected_cosmetic.clone(),
            created_at: record.created_at,
        }
    }
}

/// Result of a score submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub coins: u64,
    pub best_level: u32,
    pub display_name: String,
}

/// Applies inbound events to a working copy of the document.
pub struct Reconciler<'a> {
    doc: &'a mut Document,
    config: &'a GameConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(doc: &'a mut Document, config: &'a GameConfig) -> Self {
        Self { doc, config }
    }

    /// Login event: create or refresh the record, mirror it onto the
    /// leaderboard, and return the public profile.
    ///
    /// Repeating an identical login is idempotent: coins and level are never
    /// touched on this path.
    pub fn login(
        &mut self,
        request: &LoginRequest,
        now: Timestamp,
    ) -> Result<PlayerProfile, ReconcileError> {
        let player = require_identity(&request.player_id)?;
        let display_name = derive_display_name(
            request.handle.as_deref(),
            request.given_name.as_deref(),
            request.family_name.as_deref(),
            player,
        );

        let record = self
            .doc
            .players
            .upsert_on_login(player, &display_name, self.config, now);
        let (best_level, coins) = (record.best_level, record.coins);
        let profile = PlayerProfile::from_record(player, record);

        self.doc
            .leaderboard
            .upsert(player, &display_name, best_level, coins, now);
        self.doc
            .leaderboard
            .enforce_bound(self.config.leaderboard_capacity);

        Ok(profile)
    }

    /// Score-submission event: accrue coins, ratchet the best level, and
    /// refresh the leaderboard mirror.
    ///
    /// Replaying the same submission legitimately doubles the coin award;
    /// deduplication is out of scope.
    pub fn submit_score(
        &mut self,
        submission: &ScoreSubmission,
        now: Timestamp,
    ) -> Result<ScoreOutcome, ReconcileError> {
        let player = require_identity(&submission.player_id)?;
        let name_override = submission
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let record = self.doc.players.apply_score(
            player,
            submission.level,
            submission.coins_earned,
            name_override,
            now,
        );
        let outcome = ScoreOutcome {
            coins: record.coins,
            best_level: record.best_level,
            display_name: record.display_name.clone(),
        };

        // Leaderboard mirror prefers the submitted name, else the stored one.
        let final_name = name_override.unwrap_or(&outcome.display_name);
        self.doc
            .leaderboard
            .upsert(player, final_name, outcome.best_level, outcome.coins, now);
        self.doc
            .leaderboard
            .enforce_bound(self.config.leaderboard_capacity);

        Ok(outcome)
    }

    /// Cosmetic selection; rejects unknown players and locked cosmetics
    /// without touching any state.
    pub fn select_cosmetic(
        &mut self,
        player_id: &PlayerId,
        cosmetic: &CosmeticId,
    ) -> Result<PlayerProfile, ReconcileError> {
        let player = require_identity(player_id)?;
        let record = self.doc.players.select_cosmetic(player, cosmetic)?;
        Ok(PlayerProfile::from_record(player, record))
    }
}

fn require_identity(player: &PlayerId) -> Result<&PlayerId, ReconcileError> {
    if player.is_empty() {
        Err(ReconcileError::MissingIdentity)
    } else {
        Ok(player)
    }
}
