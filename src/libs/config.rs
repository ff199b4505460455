//! Configuration for curricula.
//!
//! The only setting is where the database lives. It is resolved in this
//! order:
//!
//! 1. the `CURRICULA_DB` environment variable (also read from `.env`)
//! 2. `database.path` in `config.json` under the user data directory
//! 3. `curricula.db` in the user data directory
//!
//! The data directory is platform specific:
//! - **Windows**: `%LOCALAPPDATA%\curricula`
//! - **macOS**: `~/Library/Application Support/curricula`
//! - **Linux**: `~/.local/share/curricula`
//!
//! The special path `:memory:` selects a throwaway in-memory database.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curricula::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("database: {}", config.database_path()?.display());
//! # Ok::<(), curricula::libs::error::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::error::{Error, Result};
use crate::libs::messages::Message;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the configured database path.
pub const DB_ENV_VAR: &str = "CURRICULA_DB";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DatabaseConfig {
    /// Database file, or `:memory:`. Unset means the default file in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    pub fn with_database_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseConfig { path: Some(path.into()) },
        }
    }

    /// Reads `config.json` from the user data directory.
    ///
    /// A missing file yields the default configuration.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(config_file_path: &Path) -> Result<Config> {
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        serde_json::from_str(&config_str).map_err(|e| Error::Config(format!("{}: {}", config_file_path.display(), e)))
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, config_file_path: &Path) -> Result<()> {
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self).map_err(|e| Error::Config(e.to_string()))?;
        Ok(())
    }

    /// The database path after applying the environment override.
    pub fn database_path(&self) -> Result<PathBuf> {
        dotenv::dotenv().ok();
        let env_path = env::var(DB_ENV_VAR).ok();
        self.resolve_database_path(env_path.as_deref(), &DataStorage::new())
    }

    /// Resolves the database path from an explicit override, the configured
    /// path, or the default file inside `storage`.
    pub fn resolve_database_path(&self, env_override: Option<&str>, storage: &DataStorage) -> Result<PathBuf> {
        if let Some(path) = env_override.map(str::trim).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        storage.get_path(DB_FILE_NAME)
    }

    /// Prompts for the database path, starting from the current value.
    pub fn init() -> Result<Config> {
        let mut config = Config::read()?;
        let current = config.database_path()?;

        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(current.display().to_string())
            .interact_text()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.database.path = Some(PathBuf::from(path.trim()));
        Ok(config)
    }
}
