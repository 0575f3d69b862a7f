//! Tests for the in-memory mapping store.

use linkdrop_core::{MediaDescriptor, MediaKind};
use linkdrop_database::{InMemoryMediaRepository, MediaRepository, RegisterOutcome};
use std::sync::Arc;

#[tokio::test]
async fn test_register_then_lookup_round_trip() {
    let repo = InMemoryMediaRepository::new();

    let outcome = repo
        .register("promo", "ABC123", "video", Some("New Year Promo"))
        .await
        .unwrap();

    let expected = MediaDescriptor::new(
        "promo",
        "ABC123",
        MediaKind::Video,
        Some("New Year Promo".to_string()),
    );
    assert_eq!(outcome, RegisterOutcome::Registered(expected.clone()));
    assert_eq!(repo.lookup("promo").await.unwrap(), Some(expected));
}

#[tokio::test]
async fn test_lookup_missing_slug() {
    let repo = InMemoryMediaRepository::new();
    assert_eq!(repo.lookup("unknownslug").await.unwrap(), None);
}

#[tokio::test]
async fn test_duplicate_slug_leaves_descriptor_unchanged() {
    let repo = InMemoryMediaRepository::new();
    repo.register("promo", "ABC123", "video", Some("first"))
        .await
        .unwrap();

    let second = repo
        .register("promo", "OTHER", "photo", Some("second"))
        .await
        .unwrap();

    assert_eq!(second, RegisterOutcome::AlreadyExists);
    let stored = repo.lookup("promo").await.unwrap().unwrap();
    assert_eq!(stored.media_handle(), "ABC123");
    assert_eq!(*stored.media_kind(), MediaKind::Video);
    assert_eq!(stored.caption().as_deref(), Some("first"));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_kind_never_stored() {
    let repo = InMemoryMediaRepository::new();

    for kind in ["audio", "Photo", "VIDEO", ""] {
        let outcome = repo.register("clip", "H1", kind, None).await.unwrap();
        assert_eq!(outcome, RegisterOutcome::InvalidKind(kind.to_string()));
    }

    assert!(repo.is_empty().await);
    assert_eq!(repo.lookup("clip").await.unwrap(), None);
}

#[tokio::test]
async fn test_count_tracks_distinct_successful_registrations() {
    let repo = InMemoryMediaRepository::new();
    assert_eq!(repo.count().await.unwrap(), 0);

    repo.register("a", "h1", "photo", None).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    repo.register("a", "h2", "photo", None).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    repo.register("b", "h3", "nope", None).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    repo.register("b", "h3", "document", None).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_concurrent_registration_of_one_slug() {
    let repo = Arc::new(InMemoryMediaRepository::new());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.register("race", &format!("handle-{i}"), "photo", None)
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut registered = 0;
    for handle in handles {
        if let RegisterOutcome::Registered(_) = handle.await.unwrap() {
            registered += 1;
        }
    }

    assert_eq!(registered, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}
