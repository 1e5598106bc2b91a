//! Read-model types returned by the handle's query operations.

use serde::{Deserialize, Serialize};

use arrows_core::RankedEntry;

/// One page of the ranked leaderboard plus the headline player count.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaderboardPage {
    pub entries: Vec<RankedEntry>,
    pub total_players: usize,
}
