// src/core/session.rs
use std::fs;
use std::path::PathBuf;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::Principal;

/// Version of the persisted account/session documents.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An account already exists for {0}")]
    AccountExists(String),

    #[error("No active session")]
    NotAuthenticated,

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema version {0}")]
    SchemaVersion(u32),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// An authenticated principal plus the opaque token the remote
/// collaborator expects on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub principal: Principal,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredAccount {
    principal: Principal,
    // Argon2id PHC string, never the password itself
    password_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct AccountsDocument {
    schema_version: u32,
    accounts: Vec<StoredAccount>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionDocument {
    schema_version: u32,
    session: Session,
}

/// Owns the account records and the single active session. Created on
/// startup, torn down with the process; there is no ambient global
/// state behind it.
pub struct SessionManager {
    data_dir: PathBuf,
}

impl SessionManager {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn accounts_path(&self) -> PathBuf {
        self.data_dir.join("accounts.json")
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    fn load_accounts(&self) -> Result<AccountsDocument> {
        let path = self.accounts_path();
        if !path.exists() {
            return Ok(AccountsDocument { schema_version: SCHEMA_VERSION, accounts: Vec::new() });
        }
        let document: AccountsDocument = serde_json::from_str(&fs::read_to_string(path)?)?;
        if document.schema_version != SCHEMA_VERSION {
            return Err(SessionError::SchemaVersion(document.schema_version));
        }
        Ok(document)
    }

    fn save_accounts(&self, document: &AccountsDocument) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.accounts_path(), serde_json::to_string_pretty(document)?)?;
        Ok(())
    }

    fn persist_session(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let document = SessionDocument { schema_version: SCHEMA_VERSION, session: session.clone() };
        fs::write(self.session_path(), serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| SessionError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| SessionError::Hash(e.to_string()))?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    }

    /// Create an account and open a session for it. The email must not
    /// already be registered.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let mut document = self.load_accounts()?;

        if document.accounts.iter().any(|account| account.principal.email == email) {
            return Err(SessionError::AccountExists(email.to_string()));
        }

        let principal = Principal {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
        };

        document.accounts.push(StoredAccount {
            principal: principal.clone(),
            password_hash: Self::hash_password(password)?,
        });
        self.save_accounts(&document)?;

        let session = Session { principal, token: Uuid::new_v4().to_string() };
        self.persist_session(&session)?;

        log::info!("Registered account for {email}");
        Ok(session)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let document = self.load_accounts()?;

        let account = document
            .accounts
            .iter()
            .find(|account| account.principal.email == email)
            .ok_or(SessionError::InvalidCredentials)?;

        if !Self::verify_password(password, &account.password_hash)? {
            return Err(SessionError::InvalidCredentials);
        }

        let session = Session {
            principal: account.principal.clone(),
            token: Uuid::new_v4().to_string(),
        };
        self.persist_session(&session)?;

        log::info!("Session opened for {email}");
        Ok(session)
    }

    /// Tear down the active session, if any. Idempotent.
    pub fn logout(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        log::info!("Session closed");
        Ok(())
    }

    /// The persisted active session from a previous run, if still
    /// present.
    pub fn current(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let document: SessionDocument = serde_json::from_str(&fs::read_to_string(path)?)?;
        if document.schema_version != SCHEMA_VERSION {
            return Err(SessionError::SchemaVersion(document.schema_version));
        }
        Ok(Some(document.session))
    }

    /// Update the active principal's profile fields, keeping the
    /// account record and persisted session in step.
    pub fn update_profile(
        &self,
        session: &mut Session,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<()> {
        let mut document = self.load_accounts()?;

        let account = document
            .accounts
            .iter_mut()
            .find(|account| account.principal.id == session.principal.id)
            .ok_or(SessionError::NotAuthenticated)?;

        if let Some(name) = name {
            account.principal.name = name.to_string();
        }
        if let Some(email) = email {
            account.principal.email = email.to_string();
        }
        session.principal = account.principal.clone();

        self.save_accounts(&document)?;
        self.persist_session(session)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (SessionManager, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        (SessionManager::new(dir.path().to_path_buf()), dir)
    }

    #[test]
    fn register_then_login() {
        let (manager, _dir) = manager();

        let session = manager
            .register("Ada", "ada@example.com", "correct horse")
            .expect("register");
        assert_eq!(session.principal.email, "ada@example.com");

        let login = manager.login("ada@example.com", "correct horse").expect("login");
        assert_eq!(login.principal.id, session.principal.id);
        // A fresh login gets a fresh token.
        assert_ne!(login.token, session.token);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let (manager, _dir) = manager();
        manager.register("Ada", "ada@example.com", "correct horse").expect("register");

        let err = manager.login("ada@example.com", "wrong").expect_err("login");
        assert!(matches!(err, SessionError::InvalidCredentials));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let (manager, _dir) = manager();
        manager.register("Ada", "ada@example.com", "one").expect("register");

        let err = manager.register("Eve", "ada@example.com", "two").expect_err("register");
        assert!(matches!(err, SessionError::AccountExists(_)));
    }

    #[test]
    fn password_is_stored_hashed() {
        let (manager, dir) = manager();
        manager.register("Ada", "ada@example.com", "correct horse").expect("register");

        let raw = std::fs::read_to_string(dir.path().join("accounts.json")).expect("read");
        assert!(!raw.contains("correct horse"));
        assert!(raw.contains("$argon2"));
    }

    #[test]
    fn logout_clears_persisted_session() {
        let (manager, _dir) = manager();
        manager.register("Ada", "ada@example.com", "pw12345678").expect("register");
        assert!(manager.current().expect("current").is_some());

        manager.logout().expect("logout");
        assert!(manager.current().expect("current").is_none());

        // Logging out twice is fine.
        manager.logout().expect("logout again");
    }

    #[test]
    fn update_profile_persists() {
        let (manager, _dir) = manager();
        let mut session = manager
            .register("Ada", "ada@example.com", "pw12345678")
            .expect("register");

        manager
            .update_profile(&mut session, Some("Ada Lovelace"), None)
            .expect("update");
        assert_eq!(session.principal.name, "Ada Lovelace");

        let restored = manager.current().expect("current").expect("session");
        assert_eq!(restored.principal.name, "Ada Lovelace");
    }
}
