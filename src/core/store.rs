// src/core/store.rs
use uuid::Uuid;

use crate::core::session::Session;
use crate::models::{CredentialEntry, EntryPatch, NewEntry, Principal};
use crate::remote::RemoteVault;

/// Where the mirror stands relative to the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// No principal attached; the mirror is empty.
    Empty,
    /// A principal just attached; nothing fetched yet.
    Loading,
    /// Mirror reflects the last successful fetch or mutation.
    Ready,
    /// A mutation or load is in flight.
    Mutating,
    /// The last operation failed; the mirror was left untouched
    /// (empty after a failed load).
    ReadyWithError,
}

/// In-memory mirror of one principal's credential entries, kept
/// consistent with the remote collaborator by confirm-then-apply:
/// every mutation goes to the remote first and only lands in the
/// mirror once the remote has acknowledged it.
///
/// Operations take `&mut self`, so two store calls can never overlap
/// and a response can never be applied after `detach` tore the mirror
/// down. Mutations for the same id issued back to back still resolve
/// last-response-wins on the remote side; the store does not attempt
/// conflict detection.
pub struct CredentialStore {
    remote: RemoteVault,
    session: Option<Session>,
    mirror: Vec<CredentialEntry>,
    state: StoreState,
    last_error: Option<String>,
}

impl CredentialStore {
    pub fn new(remote: RemoteVault) -> Self {
        Self {
            remote,
            session: None,
            mirror: Vec::new(),
            state: StoreState::Empty,
            last_error: None,
        }
    }

    /// Bind the store to an authenticated session. Any previous
    /// principal's mirror is dropped; the caller is expected to
    /// `load()` next.
    pub fn attach_session(&mut self, session: Session) {
        self.mirror.clear();
        self.last_error = None;
        self.session = Some(session);
        self.state = StoreState::Loading;
    }

    /// Tear down on logout: mirror emptied, no principal.
    pub fn detach(&mut self) {
        self.session = None;
        self.mirror.clear();
        self.last_error = None;
        self.state = StoreState::Empty;
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.session.as_ref().map(|session| &session.principal)
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The mirror, in insertion order.
    pub fn entries(&self) -> &[CredentialEntry] {
        &self.mirror
    }

    /// Local lookup only; never touches the remote side.
    pub fn get(&self, id: Uuid) -> Option<&CredentialEntry> {
        self.mirror.iter().find(|entry| entry.id == id)
    }

    /// Replace the mirror wholesale from the remote side. On failure
    /// the mirror is emptied and the error surfaced; the caller may
    /// simply call `load()` again to retry.
    pub async fn load(&mut self) -> bool {
        let Some(session) = self.session.clone() else {
            log::warn!("load called with no active principal");
            return false;
        };

        self.state = StoreState::Loading;
        match self.remote.list_entries(&session.token, session.principal.id).await {
            Ok(entries) => {
                log::debug!("Loaded {} entries for {}", entries.len(), session.principal.email);
                self.mirror = entries;
                self.last_error = None;
                self.state = StoreState::Ready;
                true
            }
            Err(e) => {
                log::warn!("Failed to load entries: {e}");
                self.mirror.clear();
                self.last_error = Some(e.to_string());
                self.state = StoreState::ReadyWithError;
                false
            }
        }
    }

    /// Create an entry remotely and append the acknowledged record
    /// (with its server-assigned id and timestamps) to the mirror.
    pub async fn add(&mut self, fields: NewEntry) -> bool {
        let Some(session) = self.session.clone() else {
            log::warn!("add called with no active principal");
            return false;
        };

        self.state = StoreState::Mutating;
        match self.remote.create_entry(&session.token, session.principal.id, &fields).await {
            Ok(entry) => {
                self.mirror.push(entry);
                self.last_error = None;
                self.state = StoreState::Ready;
                true
            }
            Err(e) => {
                log::warn!("Failed to add entry: {e}");
                self.last_error = Some(e.to_string());
                self.state = StoreState::ReadyWithError;
                false
            }
        }
    }

    /// Patch an entry remotely, then merge the acknowledged record
    /// into the mirror by id.
    pub async fn update(&mut self, id: Uuid, patch: EntryPatch) -> bool {
        let Some(session) = self.session.clone() else {
            log::warn!("update called with no active principal");
            return false;
        };

        self.state = StoreState::Mutating;
        match self.remote.update_entry(&session.token, session.principal.id, id, &patch).await {
            Ok(updated) => {
                if let Some(entry) = self.mirror.iter_mut().find(|entry| entry.id == id) {
                    *entry = updated;
                }
                self.last_error = None;
                self.state = StoreState::Ready;
                true
            }
            Err(e) => {
                log::warn!("Failed to update entry {id}: {e}");
                self.last_error = Some(e.to_string());
                self.state = StoreState::ReadyWithError;
                false
            }
        }
    }

    /// Delete an entry remotely, then drop it from the mirror.
    pub async fn delete(&mut self, id: Uuid) -> bool {
        let Some(session) = self.session.clone() else {
            log::warn!("delete called with no active principal");
            return false;
        };

        self.state = StoreState::Mutating;
        match self.remote.delete_entry(&session.token, session.principal.id, id).await {
            Ok(()) => {
                self.mirror.retain(|entry| entry.id != id);
                self.last_error = None;
                self.state = StoreState::Ready;
                true
            }
            Err(e) => {
                log::warn!("Failed to delete entry {id}: {e}");
                self.last_error = Some(e.to_string());
                self.state = StoreState::ReadyWithError;
                false
            }
        }
    }
}
