//! The persisted document aggregate and its constituent state types.

mod common;
mod cosmetics;
mod leaderboard;
mod player;

pub use common::{CosmeticId, PlayerId, Timestamp};
pub use cosmetics::{Cosmetic, CosmeticCatalog, DEFAULT_COSMETIC_ID};
pub use leaderboard::{Leaderboard, LeaderboardEntry, RankedEntry};
pub use player::{PlayerRecord, Players};

use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Aggregate of all persisted state, read and written as one unit.
///
/// The document is the sole source of truth; nothing outside it survives
/// between requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub players: Players,
    pub leaderboard: Leaderboard,
    /// Static shop reference data; absent in documents written before the
    /// catalog existed, in which case the standard catalog is substituted.
    #[serde(default)]
    pub catalog: CosmeticCatalog,
}

/// Aggregate counters reported by the operator stats endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_players: usize,
    /// Players that progressed past the first level.
    pub total_games_started: usize,
    pub total_coins_issued: u64,
    /// Players with activity in the last 24 hours.
    pub active_today: usize,
}

impl Document {
    /// Derive the operator-facing counters from the player records.
    pub fn stats(&self, now: Timestamp) -> StatsSnapshot {
        StatsSnapshot {
            total_players: self.players.len(),
            total_games_started: self
                .players
                .iter()
                .filter(|(_, record)| record.best_level > 1)
                .count(),
            total_coins_issued: self.players.iter().map(|(_, record)| record.coins).sum(),
            active_today: self
                .players
                .iter()
                .filter(|(_, record)| record.last_active_at.seconds_until(now) < SECONDS_PER_DAY)
                .count(),
        }
    }
}
