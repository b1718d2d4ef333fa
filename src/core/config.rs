// src/core/config.rs
use std::env;
use std::path::PathBuf;

use log::LevelFilter;

// Configuration for the vault core
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the local entry store and session files.
    pub data_dir: PathBuf,

    /// Base URL of the account API. When set, the store talks to the
    /// HTTP backend; when unset, everything stays on disk.
    pub api_url: Option<String>,

    // Password generation
    pub default_password_length: usize,

    // Logging
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("securevault");

        Self {
            data_dir,
            api_url: None,
            default_password_length: 16,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Log level for initializing the logger before the full config
    /// is parsed, so that config parsing itself can log.
    pub fn bootstrap_log_level() -> LevelFilter {
        env::var("SECUREVAULT_LOG_LEVEL")
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }

    // Load configuration from environment variables
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Ok(dir) = env::var("SECUREVAULT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(url) = env::var("SECUREVAULT_API_URL") {
            if !url.trim().is_empty() {
                config.api_url = Some(url);
            }
        }

        if let Ok(length) = env::var("SECUREVAULT_PASSWORD_LENGTH") {
            match length.parse() {
                Ok(length) => config.default_password_length = length,
                Err(_) => log::warn!("Ignoring invalid SECUREVAULT_PASSWORD_LENGTH: {length}"),
            }
        }

        if let Ok(level) = env::var("SECUREVAULT_LOG_LEVEL") {
            match level.parse() {
                Ok(level) => config.log_level = level,
                Err(_) => log::warn!("Ignoring invalid SECUREVAULT_LOG_LEVEL: {level}"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations cannot race each other under
    // the parallel test runner.
    #[test]
    fn environment_parsing_and_fallbacks() {
        env::set_var("SECUREVAULT_LOG_LEVEL", "debug");
        assert_eq!(Config::bootstrap_log_level(), LevelFilter::Debug);

        env::set_var("SECUREVAULT_LOG_LEVEL", "not-a-level");
        assert_eq!(Config::bootstrap_log_level(), LevelFilter::Info);

        env::set_var("SECUREVAULT_PASSWORD_LENGTH", "not-a-number");
        let config = Config::load();
        assert_eq!(config.default_password_length, 16);
        assert_eq!(config.log_level, LevelFilter::Info);

        env::set_var("SECUREVAULT_PASSWORD_LENGTH", "24");
        let config = Config::load();
        assert_eq!(config.default_password_length, 24);

        env::remove_var("SECUREVAULT_LOG_LEVEL");
        env::remove_var("SECUREVAULT_PASSWORD_LENGTH");
    }
}
