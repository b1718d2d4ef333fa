// src/lib.rs
pub mod cli;
pub mod core;
pub mod generators;
pub mod models;
pub mod remote;
pub mod tools;

pub use crate::core::config::Config;
pub use crate::core::session::{Session, SessionManager};
pub use crate::core::store::{CredentialStore, StoreState};
pub use crate::remote::RemoteVault;
