use serde::{Deserialize, Serialize};

/// Whether a login-only visit counts as player activity.
///
/// The two historical deployments of this backend disagreed on the point, so
/// it is a policy knob rather than hardcoded behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastActivePolicy {
    /// `last_active_at` moves only on score submissions.
    #[default]
    ScoreEventsOnly,
    /// `last_active_at` also moves on login lookups.
    EveryVisit,
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// One-time coin grant for players created through a login.
    pub starting_coins: u64,
    /// Maximum number of leaderboard entries retained after any upsert.
    pub leaderboard_capacity: usize,
    /// When login-only visits refresh `last_active_at`.
    pub last_active_policy: LastActivePolicy,
}

impl GameConfig {
    pub const DEFAULT_STARTING_COINS: u64 = 100;
    pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self {
            starting_coins: Self::DEFAULT_STARTING_COINS,
            leaderboard_capacity: Self::DEFAULT_LEADERBOARD_CAPACITY,
            last_active_policy: LastActivePolicy::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
