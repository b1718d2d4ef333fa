// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user whose credentials are being managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// One stored service login record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub service_name: String,
    pub login_identifier: String,
    pub secret: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry fields supplied by the caller on create. Identity fields
/// (`id`, `owner_id`, timestamps) are assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    pub service_name: String,
    pub login_identifier: String,
    pub secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update of an entry. `None` fields are left untouched, so
/// they must stay out of the serialized body entirely: the account
/// API treats an explicit `null` as "clear this field".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CredentialEntry {
    /// Merge a patch into this entry, refreshing `updated_at`.
    pub fn apply_patch(&mut self, patch: &EntryPatch) {
        if let Some(service_name) = &patch.service_name {
            self.service_name = service_name.clone();
        }
        if let Some(login_identifier) = &patch.login_identifier {
            self.login_identifier = login_identifier.clone();
        }
        if let Some(secret) = &patch.secret {
            self.secret = secret.clone();
        }
        if let Some(url) = &patch.url {
            self.url = Some(url.clone());
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        self.updated_at = Utc::now();
    }
}

// Password generation options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

/// Password strength, derived on every evaluation and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Strength {
    pub score: u8,
    pub label: &'static str,
}
