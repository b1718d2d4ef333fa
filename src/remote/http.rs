// src/remote/http.rs
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{CredentialEntry, EntryPatch, NewEntry};

use super::{RemoteBackend, RemoteError, Result};

/// Client for the account API. The server scopes every call to the
/// principal behind the session token, so `owner_id` is not sent on
/// the wire; the token travels as a bearer header rather than a
/// cookie.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into a typed error, pulling the
    /// server's `message` field out of the body when there is one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RemoteError::Unauthorized);
        }
        let message = response
            .json::<ApiError>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        Err(RemoteError::Status { status: status.as_u16(), message })
    }
}

impl RemoteBackend for HttpBackend {
    async fn list_entries(&self, token: &str, _owner_id: Uuid) -> Result<Vec<CredentialEntry>> {
        let response = self
            .client
            .get(self.url("/user/accounts"))
            .bearer_auth(token)
            .send()
            .await?;
        let entries = Self::check(response).await?.json().await?;
        Ok(entries)
    }

    async fn create_entry(
        &self,
        token: &str,
        _owner_id: Uuid,
        fields: &NewEntry,
    ) -> Result<CredentialEntry> {
        let response = self
            .client
            .post(self.url("/account/create"))
            .bearer_auth(token)
            .json(fields)
            .send()
            .await?;
        let entry = Self::check(response).await?.json().await?;
        Ok(entry)
    }

    async fn update_entry(
        &self,
        token: &str,
        _owner_id: Uuid,
        id: Uuid,
        patch: &EntryPatch,
    ) -> Result<CredentialEntry> {
        let response = self
            .client
            .put(self.url(&format!("/account/update/{id}")))
            .bearer_auth(token)
            .json(patch)
            .send()
            .await?;
        let entry = Self::check(response).await?.json().await?;
        Ok(entry)
    }

    async fn delete_entry(&self, token: &str, _owner_id: Uuid, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/account/delete/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
