// src/remote/local.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CredentialEntry, EntryPatch, NewEntry};

use super::{RemoteBackend, RemoteError, Result};

/// Version of the persisted document layout. Bump on any breaking
/// change to `EntryDocument`.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct EntryDocument {
    schema_version: u32,
    entries: Vec<CredentialEntry>,
}

impl EntryDocument {
    fn empty() -> Self {
        Self { schema_version: SCHEMA_VERSION, entries: Vec::new() }
    }
}

/// On-disk backend: one versioned JSON document per principal, keyed
/// by principal id in the file name. Stands in for the HTTP API in
/// offline mode and in tests.
pub struct LocalBackend {
    data_dir: PathBuf,
}

impl LocalBackend {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn entries_path(&self, owner_id: Uuid) -> PathBuf {
        self.data_dir.join(format!("entries-{owner_id}.json"))
    }

    fn load_document(&self, path: &Path) -> Result<EntryDocument> {
        if !path.exists() {
            return Ok(EntryDocument::empty());
        }
        let content = fs::read_to_string(path)?;
        let document: EntryDocument = serde_json::from_str(&content)?;
        if document.schema_version != SCHEMA_VERSION {
            return Err(RemoteError::SchemaVersion(document.schema_version));
        }
        Ok(document)
    }

    fn save_document(&self, path: &Path, document: &EntryDocument) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(document)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl RemoteBackend for LocalBackend {
    async fn list_entries(&self, _token: &str, owner_id: Uuid) -> Result<Vec<CredentialEntry>> {
        let document = self.load_document(&self.entries_path(owner_id))?;
        Ok(document.entries)
    }

    async fn create_entry(
        &self,
        _token: &str,
        owner_id: Uuid,
        fields: &NewEntry,
    ) -> Result<CredentialEntry> {
        let path = self.entries_path(owner_id);
        let mut document = self.load_document(&path)?;

        let now = Utc::now();
        let entry = CredentialEntry {
            id: Uuid::new_v4(),
            owner_id,
            service_name: fields.service_name.clone(),
            login_identifier: fields.login_identifier.clone(),
            secret: fields.secret.clone(),
            url: fields.url.clone(),
            notes: fields.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        document.entries.push(entry.clone());
        self.save_document(&path, &document)?;
        Ok(entry)
    }

    async fn update_entry(
        &self,
        _token: &str,
        owner_id: Uuid,
        id: Uuid,
        patch: &EntryPatch,
    ) -> Result<CredentialEntry> {
        let path = self.entries_path(owner_id);
        let mut document = self.load_document(&path)?;

        let entry = document
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(RemoteError::NotFound)?;

        entry.apply_patch(patch);
        let updated = entry.clone();
        self.save_document(&path, &document)?;
        Ok(updated)
    }

    async fn delete_entry(&self, _token: &str, owner_id: Uuid, id: Uuid) -> Result<()> {
        let path = self.entries_path(owner_id);
        let mut document = self.load_document(&path)?;

        let before = document.entries.len();
        document.entries.retain(|entry| entry.id != id);
        if document.entries.len() == before {
            return Err(RemoteError::NotFound);
        }

        self.save_document(&path, &document)?;
        Ok(())
    }
}
