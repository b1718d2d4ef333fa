// src/remote/mod.rs
//
// The remote collaborator behind the credential store: the backend
// that actually persists accounts and entries. The HTTP backend talks
// to the real API; the local backend keeps a namespaced on-disk store
// for offline use and tests. Dispatch is by enum rather than trait
// objects.
use uuid::Uuid;

use crate::models::{CredentialEntry, EntryPatch, NewEntry};

pub mod http;
pub mod local;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("entry not found")]
    NotFound,

    #[error("not authorized for this operation")]
    Unauthorized,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version {0}")]
    SchemaVersion(u32),
}

pub type Result<T> = std::result::Result<T, RemoteError>;

// Backend contract - implemented by each backend type. The session
// token is threaded explicitly instead of riding on ambient cookie
// state.
#[allow(async_fn_in_trait)]
pub trait RemoteBackend {
    async fn list_entries(&self, token: &str, owner_id: Uuid) -> Result<Vec<CredentialEntry>>;

    async fn create_entry(
        &self,
        token: &str,
        owner_id: Uuid,
        fields: &NewEntry,
    ) -> Result<CredentialEntry>;

    async fn update_entry(
        &self,
        token: &str,
        owner_id: Uuid,
        id: Uuid,
        patch: &EntryPatch,
    ) -> Result<CredentialEntry>;

    async fn delete_entry(&self, token: &str, owner_id: Uuid, id: Uuid) -> Result<()>;
}

pub enum BackendKind {
    Http(http::HttpBackend),
    Local(local::LocalBackend),
}

/// The backend facade handed to the credential store.
pub struct RemoteVault {
    backend: BackendKind,
}

impl RemoteVault {
    pub fn new(backend: BackendKind) -> Self {
        Self { backend }
    }

    /// Select a backend from the configured API URL: present means
    /// HTTP, absent means the local on-disk store.
    pub fn from_config(config: &crate::core::config::Config) -> Self {
        let backend = match &config.api_url {
            Some(url) => BackendKind::Http(http::HttpBackend::new(url.clone())),
            None => BackendKind::Local(local::LocalBackend::new(config.data_dir.clone())),
        };
        Self::new(backend)
    }

    pub async fn list_entries(&self, token: &str, owner_id: Uuid) -> Result<Vec<CredentialEntry>> {
        match &self.backend {
            BackendKind::Http(backend) => backend.list_entries(token, owner_id).await,
            BackendKind::Local(backend) => backend.list_entries(token, owner_id).await,
        }
    }

    pub async fn create_entry(
        &self,
        token: &str,
        owner_id: Uuid,
        fields: &NewEntry,
    ) -> Result<CredentialEntry> {
        match &self.backend {
            BackendKind::Http(backend) => backend.create_entry(token, owner_id, fields).await,
            BackendKind::Local(backend) => backend.create_entry(token, owner_id, fields).await,
        }
    }

    pub async fn update_entry(
        &self,
        token: &str,
        owner_id: Uuid,
        id: Uuid,
        patch: &EntryPatch,
    ) -> Result<CredentialEntry> {
        match &self.backend {
            BackendKind::Http(backend) => backend.update_entry(token, owner_id, id, patch).await,
            BackendKind::Local(backend) => backend.update_entry(token, owner_id, id, patch).await,
        }
    }

    pub async fn delete_entry(&self, token: &str, owner_id: Uuid, id: Uuid) -> Result<()> {
        match &self.backend {
            BackendKind::Http(backend) => backend.delete_entry(token, owner_id, id).await,
            BackendKind::Local(backend) => backend.delete_entry(token, owner_id, id).await,
        }
    }
}
