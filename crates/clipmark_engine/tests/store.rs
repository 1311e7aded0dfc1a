use clipmark_engine::{DocumentStore, MemoryStore, SessionFileStore};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn memory_store_round_trips_the_document() {
    let store = MemoryStore::new();
    assert_eq!(store.get().await.unwrap(), None);

    store.set("# draft").await.unwrap();
    assert_eq!(store.get().await.unwrap().as_deref(), Some("# draft"));
}

#[tokio::test]
async fn last_write_wins() {
    let store = MemoryStore::new();
    store.set("first").await.unwrap();
    store.set("second").await.unwrap();
    assert_eq!(store.get().await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn every_write_notifies_watchers_including_the_writer() {
    let store = MemoryStore::new();
    let mut own = store.watch();
    let mut other = store.watch();

    store.set("value").await.unwrap();

    // The platform notifies all contexts, the writer included; the core's
    // guard is what suppresses the self-triggered reload, not the store.
    assert!(own.changed().await);
    assert!(other.changed().await);
}

#[tokio::test]
async fn notification_is_sent_before_set_resolves() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let mut listener = store.watch();

    store.set("value").await.unwrap();

    // The change is already observable without further writes.
    let woke = tokio::time::timeout(std::time::Duration::from_millis(10), listener.changed())
        .await
        .expect("listener should already be notified");
    assert!(woke);
}

#[tokio::test]
async fn file_store_reads_absent_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionFileStore::new(dir.path().join("current.md"));
    assert_eq!(store.get().await.unwrap(), None);
}

#[tokio::test]
async fn file_store_persists_and_replaces_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionFileStore::new(dir.path().join("current.md"));

    store.set("# one").await.unwrap();
    assert_eq!(store.get().await.unwrap().as_deref(), Some("# one"));

    store.set("# two").await.unwrap();
    assert_eq!(store.get().await.unwrap().as_deref(), Some("# two"));

    // Exactly one file remains; no temp litter.
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn file_store_replaces_a_preexisting_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("current.md");
    std::fs::write(&path, "stale contents").unwrap();

    let store = SessionFileStore::new(&path);
    store.set("# fresh").await.unwrap();

    assert_eq!(store.get().await.unwrap().as_deref(), Some("# fresh"));
    // The target is renamed over, never removed first.
    assert!(path.exists());
}

#[tokio::test]
async fn file_store_notifies_watchers() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionFileStore::new(dir.path().join("current.md"));
    let mut listener = store.watch();

    store.set("value").await.unwrap();
    assert!(listener.changed().await);
}
