//! Tests for the PostgreSQL mapping store.
//!
//! These tests require a running PostgreSQL database reachable through
//! `DATABASE_URL`. Run with `--features integration`.

#![cfg(feature = "integration")]

use linkdrop_core::MediaKind;
use linkdrop_database::{MediaRepository, PostgresMediaRepository, RegisterOutcome};

async fn create_test_repository() -> PostgresMediaRepository {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let repo = PostgresMediaRepository::connect(&url, 4).expect("Failed to connect");
    repo.ensure_schema().await.expect("Failed to create table");
    repo
}

fn unique_slug(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let repo = create_test_repository().await;
    repo.ensure_schema().await.unwrap();
}

#[tokio::test]
async fn test_register_lookup_and_duplicate() {
    let repo = create_test_repository().await;
    let slug = unique_slug("pg-promo");
    let before = repo.count().await.unwrap();

    let outcome = repo
        .register(&slug, "ABC123", "video", Some("New Year Promo"))
        .await
        .unwrap();
    assert!(matches!(outcome, RegisterOutcome::Registered(_)));

    let stored = repo.lookup(&slug).await.unwrap().unwrap();
    assert_eq!(stored.media_handle(), "ABC123");
    assert_eq!(*stored.media_kind(), MediaKind::Video);
    assert_eq!(stored.caption().as_deref(), Some("New Year Promo"));

    let duplicate = repo.register(&slug, "XYZ", "photo", None).await.unwrap();
    assert_eq!(duplicate, RegisterOutcome::AlreadyExists);
    assert_eq!(repo.count().await.unwrap(), before + 1);
}

#[tokio::test]
async fn test_null_caption_round_trip() {
    let repo = create_test_repository().await;
    let slug = unique_slug("pg-bare");

    repo.register(&slug, "DOC1", "document", None).await.unwrap();
    let stored = repo.lookup(&slug).await.unwrap().unwrap();
    assert!(stored.caption().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_register_writes_once() {
    let repo = create_test_repository().await;
    let slug = unique_slug("pg-race");

    let (first, second) = tokio::join!(
        repo.register(&slug, "H1", "photo", Some("first")),
        repo.register(&slug, "H2", "video", Some("second")),
    );
    let outcomes = [first.unwrap(), second.unwrap()];

    let registered = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, RegisterOutcome::Registered(_)))
        .count();
    assert_eq!(registered, 1);
    assert!(outcomes.contains(&RegisterOutcome::AlreadyExists));

    let stored = repo.lookup(&slug).await.unwrap().unwrap();
    let winner = outcomes
        .iter()
        .find_map(|outcome| match outcome {
            RegisterOutcome::Registered(descriptor) => Some(descriptor),
            _ => None,
        })
        .unwrap();
    assert_eq!(&stored, winner);
}
