//! Cloneable façade for issuing commands to the backend.
//!
//! [`BackendHandle`] hides channel plumbing and offers async helpers for the
//! routing layer and other in-process clients. Clones are cheap and share
//! the same worker.

use tokio::sync::{broadcast, mpsc, oneshot};

use arrows_core::{
    Cosmetic, CosmeticId, LoginRequest, PlayerId, PlayerProfile, ScoreOutcome, ScoreSubmission,
    StatsSnapshot,
};

use super::errors::{Result, RuntimeError};
use super::views::LeaderboardPage;
use crate::events::GameEvent;
use crate::workers::Command;

/// Client-facing handle to interact with the backend.
#[derive(Clone, Debug)]
pub struct BackendHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl BackendHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Login or create the player and return the public profile.
    pub async fn login(&self, request: LoginRequest) -> Result<PlayerProfile> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Login {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Reconcile a score submission into the player's record.
    pub async fn submit_score(&self, submission: ScoreSubmission) -> Result<ScoreOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SubmitScore {
                submission,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Change the player's selected cosmetic.
    pub async fn select_cosmetic(
        &self,
        player: PlayerId,
        cosmetic: CosmeticId,
    ) -> Result<PlayerProfile> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SelectCosmetic {
                player,
                cosmetic,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Ranked leaderboard page (read-only).
    pub async fn leaderboard(&self, limit: usize) -> Result<LeaderboardPage> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Leaderboard {
                limit,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Operator stats snapshot (read-only).
    pub async fn stats(&self) -> Result<StatsSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Stats { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Cosmetic catalog (read-only reference data).
    pub async fn catalog(&self) -> Result<Vec<Cosmetic>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Catalog { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to backend events.
    ///
    /// The stream is best-effort: events published while no receiver exists
    /// are dropped, and a slow subscriber may observe lag.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }
}
