//! End-to-end reconciliation scenarios driven through the backend handle.

use std::io;

use arrows_core::{
    CosmeticId, Document, LoginRequest, PlayerId, ReconcileError, ScoreSubmission,
};
use arrows_runtime::{
    DocumentRepository, GameEvent, InMemoryRepository, JsonFileRepository, Runtime, RuntimeError,
};

fn login(id: &str, handle: &str) -> LoginRequest {
    LoginRequest {
        player_id: PlayerId::new(id),
        handle: Some(handle.to_owned()),
        ..LoginRequest::default()
    }
}

fn score(id: &str, level: u32, coins_earned: u64) -> ScoreSubmission {
    ScoreSubmission {
        player_id: PlayerId::new(id),
        display_name: None,
        level,
        coins_earned,
    }
}

fn in_memory_runtime() -> Runtime {
    Runtime::builder()
        .repository(InMemoryRepository::new())
        .build()
        .expect("runtime should build")
}

#[tokio::test]
async fn new_player_journey() {
    let runtime = in_memory_runtime();
    let handle = runtime.handle();

    let profile = handle.login(login("777", "nova")).await.unwrap();
    assert_eq!(profile.display_name, "@nova");
    assert_eq!(profile.coins, 100);
    assert_eq!(profile.best_level, 1);

    let outcome = handle.submit_score(score("777", 4, 30)).await.unwrap();
    assert_eq!(outcome.coins, 130);
    assert_eq!(outcome.best_level, 4);
    assert_eq!(outcome.display_name, "@nova");

    let outcome = handle.submit_score(score("777", 2, 10)).await.unwrap();
    assert_eq!(outcome.coins, 140);
    assert_eq!(outcome.best_level, 4);

    let page = handle.leaderboard(50).await.unwrap();
    assert_eq!(page.total_players, 1);
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].rank, 1);
    assert_eq!(page.entries[0].entry.score, 4);
}

#[tokio::test]
async fn leaderboard_keeps_only_the_top_fifty() {
    let runtime = in_memory_runtime();
    let handle = runtime.handle();

    for level in 1..=60_u32 {
        handle
            .submit_score(score(&format!("player-{level}"), level, 5))
            .await
            .unwrap();
    }

    let page = handle.leaderboard(50).await.unwrap();
    assert_eq!(page.total_players, 60);
    assert_eq!(page.entries.len(), 50);
    assert_eq!(page.entries[0].entry.score, 60);
    assert_eq!(page.entries[49].entry.score, 11);

    // Evicted players keep their records.
    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.total_players, 60);
}

#[tokio::test]
async fn missing_identity_is_rejected() {
    let runtime = in_memory_runtime();
    let handle = runtime.handle();

    let err = handle.login(login("", "nova")).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Reconcile(ReconcileError::MissingIdentity)
    ));
    assert!(err.is_client_error());

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.total_players, 0);
}

#[tokio::test]
async fn cosmetic_selection_requires_unlock() {
    let runtime = in_memory_runtime();
    let handle = runtime.handle();

    handle.login(login("777", "nova")).await.unwrap();

    let err = handle
        .select_cosmetic(PlayerId::new("777"), CosmeticId::new("fire"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Reconcile(ReconcileError::CosmeticNotUnlocked { .. })
    ));

    let profile = handle
        .select_cosmetic(PlayerId::new("777"), CosmeticId::default())
        .await
        .unwrap();
    assert_eq!(profile.selected_cosmetic, CosmeticId::default());
}

#[tokio::test]
async fn catalog_lists_the_standard_skins() {
    let runtime = in_memory_runtime();
    let handle = runtime.handle();

    let catalog = handle.catalog().await.unwrap();
    assert_eq!(catalog.len(), 6);
    assert!(catalog.iter().any(|c| c.id == CosmeticId::default()));
}

#[tokio::test]
async fn document_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arrows_data.json");

    let runtime = Runtime::builder()
        .repository(JsonFileRepository::new(&path).unwrap())
        .build()
        .unwrap();
    let handle = runtime.handle();
    handle.login(login("777", "nova")).await.unwrap();
    handle.submit_score(score("777", 7, 50)).await.unwrap();
    drop(handle);
    runtime.shutdown().await.unwrap();

    let runtime = Runtime::builder()
        .repository(JsonFileRepository::new(&path).unwrap())
        .build()
        .unwrap();
    let handle = runtime.handle();

    let outcome = handle.submit_score(score("777", 1, 0)).await.unwrap();
    assert_eq!(outcome.coins, 150);
    assert_eq!(outcome.best_level, 7);
    assert_eq!(outcome.display_name, "@nova");
}

#[tokio::test]
async fn unreadable_document_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arrows_data.json");
    std::fs::write(&path, b"{ definitely not a document").unwrap();

    let runtime = Runtime::builder()
        .repository(JsonFileRepository::new(&path).unwrap())
        .build()
        .unwrap();
    let handle = runtime.handle();

    // The request succeeds against a fresh document instead of failing.
    let profile = handle.login(login("777", "nova")).await.unwrap();
    assert_eq!(profile.coins, 100);
}

/// Repository double whose saves always fail.
struct FailingSaveRepository;

impl DocumentRepository for FailingSaveRepository {
    fn load(&self) -> arrows_runtime::repository::Result<Option<Document>> {
        Ok(None)
    }

    fn save(&self, _document: &Document) -> arrows_runtime::repository::Result<()> {
        Err(io::Error::other("disk full").into())
    }
}

#[tokio::test]
async fn save_failure_is_a_soft_warning() {
    let runtime = Runtime::builder()
        .repository(FailingSaveRepository)
        .build()
        .unwrap();
    let handle = runtime.handle();

    // The mutation result is still returned even though nothing was persisted.
    let outcome = handle.submit_score(score("777", 3, 20)).await.unwrap();
    assert_eq!(outcome.coins, 20);
    assert_eq!(outcome.best_level, 3);
}

#[tokio::test]
async fn events_reach_subscribers() {
    let runtime = in_memory_runtime();
    let handle = runtime.handle();
    let mut events = handle.subscribe_events();

    handle.login(login("777", "nova")).await.unwrap();
    match events.recv().await.unwrap() {
        GameEvent::PlayerRegistered {
            player,
            display_name,
        } => {
            assert_eq!(player, PlayerId::new("777"));
            assert_eq!(display_name, "@nova");
        }
        other => panic!("unexpected event {other:?}"),
    }

    handle.submit_score(score("777", 2, 15)).await.unwrap();
    match events.recv().await.unwrap() {
        GameEvent::ScoreRecorded {
            coins, best_level, ..
        } => {
            assert_eq!(coins, 115);
            assert_eq!(best_level, 2);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn building_without_repository_fails() {
    let err = Runtime::builder().build().unwrap_err();
    assert!(matches!(err, RuntimeError::MissingRepository));
}
