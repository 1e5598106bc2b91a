//! Player records and the collection that owns their mutation rules.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, LastActivePolicy};
use crate::error::ReconcileError;
use crate::identity::derive_display_name;

use super::{CosmeticId, PlayerId, Timestamp};

/// Per-player progress record. Created on first contact, never deleted.
///
/// Invariants: `selected_cosmetic` is a member of `cosmetics`,
/// `best_level >= 1`, and `coins` never decreases after the initial grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub display_name: String,
    pub coins: u64,
    pub best_level: u32,
    pub cosmetics: BTreeSet<CosmeticId>,
    pub selected_cosmetic: CosmeticId,
    pub created_at: Timestamp,
    pub last_active_at: Timestamp,
}

impl PlayerRecord {
    /// Fresh record with the default cosmetic unlocked and selected.
    fn new(display_name: String, coins: u64, best_level: u32, now: Timestamp) -> Self {
        let mut cosmetics = BTreeSet::new();
        cosmetics.insert(CosmeticId::default());
        Self {
            display_name,
            coins,
            best_level: best_level.max(1),
            cosmetics,
            selected_cosmetic: CosmeticId::default(),
            created_at: now,
            last_active_at: now,
        }
    }
}

/// Mapping from player identity to record; the player store of the system.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Players {
    records: BTreeMap<PlayerId, PlayerRecord>,
}

impl Players {
    pub fn get(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &PlayerRecord)> {
        self.records.iter()
    }

    /// Create-or-refresh on a login visit.
    ///
    /// New players receive the starting coin grant and level 1. Existing
    /// players get their display name overwritten when it changed; whether
    /// the visit also counts as activity is governed by
    /// [`GameConfig::last_active_policy`].
    pub fn upsert_on_login(
        &mut self,
        id: &PlayerId,
        display_name: &str,
        config: &GameConfig,
        now: Timestamp,
    ) -> &PlayerRecord {
        let record = self.records.entry(id.clone()).or_insert_with(|| {
            PlayerRecord::new(display_name.to_owned(), config.starting_coins, 1, now)
        });
        if record.display_name != display_name {
            record.display_name = display_name.to_owned();
        }
        if config.last_active_policy == LastActivePolicy::EveryVisit {
            record.last_active_at = now;
        }
        record
    }

    /// Create-or-update from a score submission.
    ///
    /// Coins are strictly additive and `best_level` is a ratchet; a lower
    /// reported level leaves it untouched. Players unseen at submission time
    /// are auto-created seeded with the submitted values (no starting grant).
    pub fn apply_score(
        &mut self,
        id: &PlayerId,
        level: u32,
        coins_delta: u64,
        name_override: Option<&str>,
        now: Timestamp,
    ) -> &PlayerRecord {
        let record = self
            .records
            .entry(id.clone())
            .and_modify(|record| {
                record.coins += coins_delta;
                record.best_level = record.best_level.max(level);
            })
            .or_insert_with(|| {
                let name = name_override
                    .map(str::to_owned)
                    .unwrap_or_else(|| derive_display_name(None, None, None, id));
                PlayerRecord::new(name, coins_delta, level, now)
            });
        if let Some(name) = name_override
            && record.display_name != name
        {
            record.display_name = name.to_owned();
        }
        record.last_active_at = now;
        record
    }

    /// Change the selected cosmetic, validating the unlock first.
    pub fn select_cosmetic(
        &mut self,
        id: &PlayerId,
        cosmetic: &CosmeticId,
    ) -> Result<&PlayerRecord, ReconcileError> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| ReconcileError::UnknownPlayer(id.clone()))?;
        if !record.cosmetics.contains(cosmetic) {
            return Err(ReconcileError::CosmeticNotUnlocked {
                player: id.clone(),
                cosmetic: cosmetic.clone(),
            });
        }
        record.selected_cosmetic = cosmetic.clone();
        Ok(record)
    }
}
