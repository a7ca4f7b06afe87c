//! Like store and coordinator semantics in local-only mode.

use std::sync::Arc;

use plantid::storage::seed::seed_plants;
use plantid::{LikeCoordinator, LocalCatalog, LocalLikeStore, PlantService};

fn coordinator() -> LikeCoordinator {
    let catalog = Arc::new(LocalCatalog::new(seed_plants()));
    let likes = Arc::new(LocalLikeStore::in_memory());
    let service = Arc::new(PlantService::new(None, catalog, likes));
    LikeCoordinator::new(service)
}

#[tokio::test]
async fn liking_twice_counts_once() {
    let store = LocalLikeStore::in_memory();

    assert!(store.like("gerbera-daisy", "device-a").await);
    assert!(store.like("gerbera-daisy", "device-a").await);
    assert_eq!(store.likes_count("gerbera-daisy").await, 1);

    // A different device is a different LikeRecord.
    assert!(store.like("gerbera-daisy", "device-b").await);
    assert_eq!(store.likes_count("gerbera-daisy").await, 2);
}

#[tokio::test]
async fn unliking_when_never_liked_is_a_failing_noop() {
    let store = LocalLikeStore::in_memory();

    assert!(!store.unlike("gerbera-daisy", "device-a").await);
    assert_eq!(store.likes_count("gerbera-daisy").await, 0);

    store.like("gerbera-daisy", "device-a").await;
    assert!(store.unlike("gerbera-daisy", "device-a").await);
    assert_eq!(store.likes_count("gerbera-daisy").await, 0);

    // Second unlike fails and the counter never goes below zero.
    assert!(!store.unlike("gerbera-daisy", "device-a").await);
    assert_eq!(store.likes_count("gerbera-daisy").await, 0);
}

#[tokio::test]
async fn corrupt_state_file_reads_as_empty_and_is_overwritten() {
    let path = std::env::temp_dir().join(format!(
        "plantid-likes-test-{}.json",
        uuid::Uuid::new_v4()
    ));
    tokio::fs::write(&path, "{not valid json at all")
        .await
        .unwrap();

    let store = LocalLikeStore::open(path.clone()).await;
    assert_eq!(store.likes_count("gerbera-daisy").await, 0);

    store.like("gerbera-daisy", "device-a").await;
    drop(store);

    // The next open sees the repaired file.
    let reopened = LocalLikeStore::open(path.clone()).await;
    assert_eq!(reopened.likes_count("gerbera-daisy").await, 1);
    assert!(reopened.is_liked("gerbera-daisy", "device-a").await);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn coordinator_like_is_idempotent() {
    let coordinator = coordinator();

    let first = coordinator.like("gerbera-daisy", "device-a").await;
    assert!(first.ok);
    assert!(first.changed);
    assert!(first.liked);
    assert_eq!(first.count, 1);

    let second = coordinator.like("gerbera-daisy", "device-a").await;
    assert!(second.ok);
    assert!(!second.changed);
    assert!(second.liked);
    assert_eq!(second.count, 1);
}

#[tokio::test]
async fn coordinator_unlike_of_unliked_plant_fails() {
    let coordinator = coordinator();

    let outcome = coordinator.unlike("gerbera-daisy", "device-a").await;
    assert!(!outcome.ok);
    assert!(!outcome.changed);
    assert!(!outcome.liked);
    assert_eq!(outcome.count, 0);
}

#[tokio::test]
async fn coordinator_toggle_flips_state() {
    let coordinator = coordinator();

    let on = coordinator.toggle("pink-adenium", "device-a").await;
    assert!(on.ok && on.changed && on.liked);
    assert_eq!(on.count, 1);

    let off = coordinator.toggle("pink-adenium", "device-a").await;
    assert!(off.ok && off.changed && !off.liked);
    assert_eq!(off.count, 0);

    // Toggles for different plants are independent.
    coordinator.toggle("pink-adenium", "device-a").await;
    coordinator.toggle("chinese-hibiscus", "device-a").await;
    let (liked_adenium, _) = coordinator.status("pink-adenium", "device-a").await;
    let (liked_hibiscus, _) = coordinator.status("chinese-hibiscus", "device-a").await;
    assert!(liked_adenium);
    assert!(liked_hibiscus);
}

#[tokio::test]
async fn status_is_fail_closed_before_any_interaction() {
    let coordinator = coordinator();

    let (liked, count) = coordinator.status("red-gerbera-daisy", "device-new").await;
    assert!(!liked);
    assert_eq!(count, 0);
}
