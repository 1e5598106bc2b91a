//! Bounded, rank-ordered view derived from player records.

use serde::{Deserialize, Serialize};

use super::{PlayerId, Timestamp};

/// One row of the global leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: PlayerId,
    pub display_name: String,
    /// Mirror of the owner's best level, merged one-directionally: only ever
    /// raised via `max`, never lowered by an ordinary update.
    pub score: u32,
    pub coins: u64,
    pub updated_at: Timestamp,
}

/// Leaderboard entry paired with its 1-based position after sorting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: u32,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

/// Bounded collection of leaderboard entries, exactly one per player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.entries.iter().any(|entry| &entry.player == player)
    }

    /// Insert or refresh the entry for `player`.
    ///
    /// The score is a ratchet: an existing entry is only raised to
    /// `candidate_score` when that is higher. Display name, coins and
    /// `updated_at` are overwritten on every call regardless of score
    /// movement.
    pub fn upsert(
        &mut self,
        player: &PlayerId,
        display_name: &str,
        candidate_score: u32,
        coins: u64,
        now: Timestamp,
    ) {
        match self.entries.iter_mut().find(|entry| &entry.player == player) {
            Some(entry) => {
                if candidate_score > entry.score {
                    entry.score = candidate_score;
                }
                entry.display_name = display_name.to_owned();
                entry.coins = coins;
                entry.updated_at = now;
            }
            None => self.entries.push(LeaderboardEntry {
                player: player.clone(),
                display_name: display_name.to_owned(),
                score: candidate_score,
                coins,
                updated_at: now,
            }),
        }
    }

    /// Re-sort descending and drop everything beyond `capacity`.
    ///
    /// Evicted entries are discarded for good: a later query will not see
    /// them again even if nothing would have displaced them under a larger
    /// bound.
    pub fn enforce_bound(&mut self, capacity: usize) {
        self.sort_descending();
        self.entries.truncate(capacity);
    }

    /// Entries sorted by score descending with 1-based ranks assigned.
    ///
    /// The sort is stable, so entries with equal scores keep their relative
    /// update order; there is no secondary key.
    pub fn ranked(&self, limit: usize) -> Vec<RankedEntry> {
        let mut sorted: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(position, entry)| RankedEntry {
                rank: position as u32 + 1,
                entry: entry.clone(),
            })
            .collect()
    }

    fn sort_descending(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now(secs: i64) -> Timestamp {
        Timestamp::new(secs)
    }

    fn board_with(scores: &[(&str, u32)]) -> Leaderboard {
        let mut board = Leaderboard::default();
        for &(id, score) in scores {
            board.upsert(&PlayerId::new(id), id, score, 0, now(1));
        }
        board
    }

    #[test]
    fn score_is_a_ratchet() {
        let mut board = Leaderboard::default();
        let alice = PlayerId::new("alice");

        board.upsert(&alice, "Alice", 5, 100, now(1));
        board.upsert(&alice, "Alice!", 3, 250, now(2));

        let entry = &board.entries()[0];
        assert_eq!(entry.score, 5, "a lower candidate must not lower the score");
        assert_eq!(entry.display_name, "Alice!");
        assert_eq!(entry.coins, 250);
        assert_eq!(entry.updated_at, now(2));
    }

    #[test]
    fn one_entry_per_player() {
        let mut board = Leaderboard::default();
        let alice = PlayerId::new("alice");
        board.upsert(&alice, "Alice", 2, 0, now(1));
        board.upsert(&alice, "Alice", 7, 0, now(2));
        assert_eq!(board.len(), 1);
        assert_eq!(board.entries()[0].score, 7);
    }

    #[test]
    fn bound_evicts_lowest_irrevocably() {
        let mut board = board_with(&[("a", 10), ("b", 30), ("c", 20), ("d", 40)]);
        board.enforce_bound(3);

        assert_eq!(board.len(), 3);
        assert!(!board.contains(&PlayerId::new("a")));

        // The evicted entry stays gone on later queries.
        let ranked = board.ranked(10);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].entry.score, 40);
        assert_eq!(ranked[2].entry.score, 20);
    }

    #[test]
    fn ranked_is_descending_with_stable_ties() {
        let mut board = board_with(&[("a", 5), ("b", 9), ("c", 5), ("d", 5)]);
        // Refreshing a tied entry must not move it past its peers.
        board.upsert(&PlayerId::new("c"), "c", 5, 10, now(2));

        let ranked = board.ranked(10);
        let order: Vec<&str> = ranked
            .iter()
            .map(|r| r.entry.player.as_str())
            .collect();
        assert_eq!(order, ["b", "a", "c", "d"]);
        assert_eq!(
            ranked.iter().map(|r| r.rank).collect::<Vec<_>>(),
            [1, 2, 3, 4]
        );
    }

    #[test]
    fn ranked_respects_limit() {
        let board = board_with(&[("a", 1), ("b", 2), ("c", 3)]);
        let ranked = board.ranked(2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].entry.score, 3);
    }
}
