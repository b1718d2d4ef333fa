//! Integration tests for the credential store.
//!
//! These drive the store against the on-disk backend the same way the
//! UI layer drives it against the HTTP backend: attach a session,
//! load, mutate, and check that the mirror only ever changes after the
//! backend has confirmed the operation.

use std::path::PathBuf;

use securevault::core::session::SessionManager;
use securevault::models::{EntryPatch, NewEntry};
use securevault::remote::local::LocalBackend;
use securevault::remote::BackendKind;
use securevault::{CredentialStore, RemoteVault, Session, StoreState};
use tempfile::TempDir;

fn local_store(data_dir: PathBuf) -> CredentialStore {
    CredentialStore::new(RemoteVault::new(BackendKind::Local(LocalBackend::new(data_dir))))
}

/// Registers an account in a fresh data dir and returns a store bound
/// to its session.
fn setup() -> (CredentialStore, Session, SessionManager, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let manager = SessionManager::new(dir.path().to_path_buf());
    let session = manager
        .register("Ada", "ada@example.com", "correct horse battery")
        .expect("register");

    let mut store = local_store(dir.path().to_path_buf());
    store.attach_session(session.clone());
    (store, session, manager, dir)
}

fn sample_entry() -> NewEntry {
    NewEntry {
        service_name: "github".to_string(),
        login_identifier: "ada@example.com".to_string(),
        secret: "s3cret-s3cret".to_string(),
        url: Some("https://github.com".to_string()),
        notes: None,
    }
}

// ============================================================================
// Round trips
// ============================================================================

#[tokio::test]
async fn add_then_get_round_trip() {
    let (mut store, session, _manager, _dir) = setup();
    assert!(store.load().await);

    assert!(store.add(sample_entry()).await);
    assert_eq!(store.state(), StoreState::Ready);
    assert_eq!(store.entries().len(), 1);

    let entry = store.entries()[0].clone();
    let found = store.get(entry.id).expect("entry should be present");
    assert_eq!(found.service_name, "github");
    assert_eq!(found.login_identifier, "ada@example.com");
    assert_eq!(found.secret, "s3cret-s3cret");
    assert_eq!(found.url.as_deref(), Some("https://github.com"));
    assert_eq!(found.owner_id, session.principal.id);
    assert_eq!(found.created_at, found.updated_at);
}

#[tokio::test]
async fn update_refreshes_updated_at() {
    let (mut store, _session, _manager, _dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;

    let entry = store.entries()[0].clone();

    // Make sure the refreshed timestamp cannot collide with the
    // original even on coarse clocks.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let patch = EntryPatch { service_name: Some("gitlab".to_string()), ..Default::default() };
    assert!(store.update(entry.id, patch).await);

    let updated = store.get(entry.id).expect("entry should still be present");
    assert_eq!(updated.service_name, "gitlab");
    assert_eq!(updated.login_identifier, "ada@example.com");
    assert!(updated.updated_at > entry.updated_at);
    assert_eq!(updated.created_at, entry.created_at);
}

#[tokio::test]
async fn delete_removes_entry_everywhere() {
    let (mut store, _session, _manager, _dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;
    let id = store.entries()[0].id;

    assert!(store.delete(id).await);
    assert!(store.get(id).is_none());
    assert!(store.entries().is_empty());

    // Gone from the backend too, not just the mirror.
    assert!(store.load().await);
    assert!(store.entries().is_empty());
}

#[tokio::test]
async fn load_replaces_mirror_wholesale() {
    let (mut store, session, _manager, dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;

    // A second store over the same backend sees the same set after a
    // load, not an accumulation.
    let mut other = local_store(dir.path().to_path_buf());
    other.attach_session(session);
    assert!(other.load().await);
    assert_eq!(other.entries().len(), 1);
    assert!(other.load().await);
    assert_eq!(other.entries().len(), 1);
}

// ============================================================================
// Failure semantics
// ============================================================================

#[tokio::test]
async fn failed_add_leaves_mirror_unchanged() {
    let (mut store, session, _manager, dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;
    assert_eq!(store.entries().len(), 1);

    // Corrupt the backend document so the next mutation is rejected.
    let entries_file = dir.path().join(format!("entries-{}.json", session.principal.id));
    std::fs::write(&entries_file, "not json").expect("corrupt file");

    let before = store.entries().to_vec();
    assert!(!store.add(sample_entry()).await);
    assert_eq!(store.state(), StoreState::ReadyWithError);
    assert!(store.last_error().is_some());
    assert_eq!(store.entries(), before.as_slice());
}

#[tokio::test]
async fn failed_update_and_delete_leave_mirror_unchanged() {
    let (mut store, _session, _manager, _dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;
    let before = store.entries().to_vec();

    let missing = uuid::Uuid::new_v4();
    let patch = EntryPatch { service_name: Some("x".to_string()), ..Default::default() };
    assert!(!store.update(missing, patch).await);
    assert_eq!(store.entries(), before.as_slice());

    assert!(!store.delete(missing).await);
    assert_eq!(store.entries(), before.as_slice());
    assert_eq!(store.state(), StoreState::ReadyWithError);
}

#[tokio::test]
async fn failed_load_yields_empty_mirror_and_error_state() {
    let (mut store, session, _manager, dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;
    assert_eq!(store.entries().len(), 1);

    let entries_file = dir.path().join(format!("entries-{}.json", session.principal.id));
    std::fs::write(&entries_file, "not json").expect("corrupt file");

    assert!(!store.load().await);
    assert_eq!(store.state(), StoreState::ReadyWithError);
    assert!(store.entries().is_empty());
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn operations_without_principal_fail_cleanly() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = local_store(dir.path().to_path_buf());

    assert!(!store.load().await);
    assert!(!store.add(sample_entry()).await);
    assert!(!store.delete(uuid::Uuid::new_v4()).await);
    assert_eq!(store.state(), StoreState::Empty);
    assert!(store.entries().is_empty());
}

// ============================================================================
// CLI handlers
// ============================================================================

#[tokio::test]
async fn delete_handler_bails_when_load_fails() {
    use securevault::cli::handlers;

    let (mut store, session, _manager, dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;
    let id = store.entries()[0].id;

    let entries_file = dir.path().join(format!("entries-{}.json", session.principal.id));
    std::fs::write(&entries_file, "not json").expect("corrupt file");

    // The handler must stop at the failed load, not push a mutation
    // at an unpopulated mirror.
    let err = handlers::handle_delete(&mut store, &id.to_string())
        .await
        .expect_err("delete should bail");
    assert!(err.to_string().starts_with("failed to load entries"), "{err}");
    assert_eq!(store.state(), StoreState::ReadyWithError);
}

#[tokio::test]
async fn update_handler_bails_when_load_fails() {
    use securevault::cli::handlers;

    let (mut store, session, _manager, dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;
    let id = store.entries()[0].id;

    let entries_file = dir.path().join(format!("entries-{}.json", session.principal.id));
    std::fs::write(&entries_file, "not json").expect("corrupt file");

    let err = handlers::handle_update(
        &mut store,
        &id.to_string(),
        Some("gitlab".to_string()),
        None,
        None,
        None,
        false,
    )
    .await
    .expect_err("update should bail");
    assert!(err.to_string().starts_with("failed to load entries"), "{err}");
}

// ============================================================================
// Principal lifecycle
// ============================================================================

#[tokio::test]
async fn logout_clears_mirror() {
    let (mut store, _session, _manager, _dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;
    assert_eq!(store.entries().len(), 1);

    store.detach();
    assert_eq!(store.state(), StoreState::Empty);
    assert!(store.entries().is_empty());
    assert!(store.principal().is_none());
}

#[tokio::test]
async fn second_principal_never_sees_first_principals_entries() {
    let (mut store, _ada, manager, _dir) = setup();
    store.load().await;
    store.add(sample_entry()).await;
    assert_eq!(store.entries().len(), 1);

    manager.logout().expect("logout");
    store.detach();

    let bob = manager.register("Bob", "bob@example.com", "open sesame 42").expect("register");
    store.attach_session(bob.clone());
    assert_eq!(store.state(), StoreState::Loading);
    assert!(store.entries().is_empty());

    assert!(store.load().await);
    assert!(store.entries().is_empty());
    assert!(store.entries().iter().all(|entry| entry.owner_id == bob.principal.id));
}
