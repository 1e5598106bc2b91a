//! Server configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

use arrows_core::{GameConfig, LastActivePolicy};

/// Configuration required to bootstrap the HTTP server and backend runtime.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub data_file: PathBuf,
    pub game: GameConfig,
}

impl ServerConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8080";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARROWS_BIND_ADDR` - listen address (default: 0.0.0.0:8080)
    /// - `ARROWS_DATA_FILE` - path of the JSON document (default: platform data dir)
    /// - `ARROWS_STARTING_COINS` - coin grant for new players (default: 100)
    /// - `ARROWS_LEADERBOARD_CAPACITY` - leaderboard bound (default: 50)
    /// - `ARROWS_TOUCH_ON_LOGIN` - count login-only visits as activity (default: false)
    pub fn from_env() -> Self {
        let mut game = GameConfig::default();

        if let Some(coins) = read_env::<u64>("ARROWS_STARTING_COINS") {
            game.starting_coins = coins;
        }
        if let Some(capacity) = read_env::<usize>("ARROWS_LEADERBOARD_CAPACITY") {
            game.leaderboard_capacity = capacity.max(1);
        }
        if read_env::<bool>("ARROWS_TOUCH_ON_LOGIN").unwrap_or(false) {
            game.last_active_policy = LastActivePolicy::EveryVisit;
        }

        let bind_addr = env::var("ARROWS_BIND_ADDR")
            .unwrap_or_else(|_| Self::DEFAULT_BIND_ADDR.to_owned());
        let data_file = env::var("ARROWS_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_file());

        Self {
            bind_addr,
            data_file,
            game,
        }
    }
}

/// Platform data directory, falling back to the working directory.
fn default_data_file() -> PathBuf {
    ProjectDirs::from("", "", "arrows")
        .map(|dirs| dirs.data_dir().join("arrows_data.json"))
        .unwrap_or_else(|| PathBuf::from("arrows_data.json"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
