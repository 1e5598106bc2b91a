//! Reconciler worker that owns the load → reconcile → save cycle.
//!
//! Receives commands from [`crate::BackendHandle`], applies them to the
//! persisted document via [`arrows_core::Reconciler`], and publishes
//! [`GameEvent`] notifications. Running every cycle on a single task
//! serializes concurrent submissions, so two requests can never clobber each
//! other's writes; the document on disk stays the sole source of truth
//! between calls.

use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::warn;

use arrows_core::{
    Cosmetic, CosmeticId, Document, GameConfig, LoginRequest, PlayerId, PlayerProfile, Reconciler,
    ScoreOutcome, ScoreSubmission, StatsSnapshot, Timestamp,
};

use crate::api::{LeaderboardPage, Result};
use crate::events::GameEvent;
use crate::repository::DocumentRepository;

/// Commands that can be sent to the reconciler worker.
pub enum Command {
    /// Login or first-contact event.
    Login {
        request: LoginRequest,
        reply: oneshot::Sender<Result<PlayerProfile>>,
    },
    /// Score-submission event.
    SubmitScore {
        submission: ScoreSubmission,
        reply: oneshot::Sender<Result<ScoreOutcome>>,
    },
    /// Cosmetic selection.
    SelectCosmetic {
        player: PlayerId,
        cosmetic: CosmeticId,
        reply: oneshot::Sender<Result<PlayerProfile>>,
    },
    /// Ranked leaderboard query (read-only).
    Leaderboard {
        limit: usize,
        reply: oneshot::Sender<LeaderboardPage>,
    },
    /// Operator stats query (read-only).
    Stats {
        reply: oneshot::Sender<StatsSnapshot>,
    },
    /// Cosmetic catalog (read-only reference data).
    Catalog {
        reply: oneshot::Sender<Vec<Cosmetic>>,
    },
}

/// Background task that processes backend commands.
pub struct ReconcilerWorker {
    repository: Box<dyn DocumentRepository>,
    config: GameConfig,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl ReconcilerWorker {
    pub fn new(
        repository: Box<dyn DocumentRepository>,
        config: GameConfig,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            repository,
            config,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Login { request, reply } => {
                let _ = reply.send(self.login(&request));
            }
            Command::SubmitScore { submission, reply } => {
                let _ = reply.send(self.submit_score(&submission));
            }
            Command::SelectCosmetic {
                player,
                cosmetic,
                reply,
            } => {
                let _ = reply.send(self.select_cosmetic(&player, &cosmetic));
            }
            Command::Leaderboard { limit, reply } => {
                let _ = reply.send(self.leaderboard(limit));
            }
            Command::Stats { reply } => {
                let _ = reply.send(self.stats());
            }
            Command::Catalog { reply } => {
                let _ = reply.send(self.catalog());
            }
        }
    }

    fn login(&mut self, request: &LoginRequest) -> Result<PlayerProfile> {
        let now = wall_clock();
        let mut document = self.load_or_default();
        let known_before = document.players.get(&request.player_id).is_some();

        let profile = Reconciler::new(&mut document, &self.config).login(request, now)?;
        self.commit(&document);

        if !known_before {
            let _ = self.event_tx.send(GameEvent::PlayerRegistered {
                player: profile.id.clone(),
                display_name: profile.display_name.clone(),
            });
        }

        Ok(profile)
    }

    fn submit_score(&mut self, submission: &ScoreSubmission) -> Result<ScoreOutcome> {
        let now = wall_clock();
        let mut document = self.load_or_default();
        let known_before = document.players.get(&submission.player_id).is_some();

        let outcome = Reconciler::new(&mut document, &self.config).submit_score(submission, now)?;
        self.commit(&document);

        if !known_before {
            let _ = self.event_tx.send(GameEvent::PlayerRegistered {
                player: submission.player_id.clone(),
                display_name: outcome.display_name.clone(),
            });
        }
        let _ = self.event_tx.send(GameEvent::ScoreRecorded {
            player: submission.player_id.clone(),
            level: submission.level,
            coins_earned: submission.coins_earned,
            best_level: outcome.best_level,
            coins: outcome.coins,
        });

        Ok(outcome)
    }

    fn select_cosmetic(&mut self, player: &PlayerId, cosmetic: &CosmeticId) -> Result<PlayerProfile> {
        let mut document = self.load_or_default();

        let profile =
            Reconciler::new(&mut document, &self.config).select_cosmetic(player, cosmetic)?;
        self.commit(&document);

        let _ = self.event_tx.send(GameEvent::CosmeticSelected {
            player: player.clone(),
            cosmetic: cosmetic.clone(),
        });

        Ok(profile)
    }

    fn leaderboard(&mut self, limit: usize) -> LeaderboardPage {
        let document = self.load_or_default();
        LeaderboardPage {
            entries: document.leaderboard.ranked(limit),
            total_players: document.players.len(),
        }
    }

    fn stats(&mut self) -> StatsSnapshot {
        self.load_or_default().stats(wall_clock())
    }

    fn catalog(&mut self) -> Vec<Cosmetic> {
        self.load_or_default().catalog.arrow_skins
    }

    /// Load the persisted document, degrading to an empty one when the
    /// backing store is missing or unreadable.
    fn load_or_default(&self) -> Document {
        match self.repository.load() {
            Ok(Some(document)) => document,
            Ok(None) => Document::default(),
            Err(error) => {
                warn!(%error, "failed to load document, starting from empty");
                Document::default()
            }
        }
    }

    /// Persist the document. A failure is a soft warning: the in-memory
    /// result is still returned to the caller, it is just not durable.
    fn commit(&self, document: &Document) {
        if let Err(error) = self.repository.save(document) {
            warn!(%error, "failed to persist document, result is not durable");
        }
    }
}

fn wall_clock() -> Timestamp {
    Timestamp::new(Utc::now().timestamp())
}
