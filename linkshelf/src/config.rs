// linkshelf/src/config.rs
use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Base URL of the hosted service (REST and auth live below it)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Public (anon) API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Table holding the bookmarks
    #[serde(default = "default_table")]
    pub table: String,

    /// Where the signed-in session is kept, `~` is expanded
    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_table() -> String {
    "bookmarks".to_string()
}

fn default_session_file() -> String {
    "~/.config/linkshelf/session.json".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            table: default_table(),
            session_file: default_session_file(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Settings {
    pub fn session_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.session_file).as_ref())
    }

    fn apply_env(&mut self) -> DomainResult<()> {
        if let Ok(api_url) = std::env::var("LINKSHELF_API_URL") {
            trace!("Using LINKSHELF_API_URL from environment: {}", api_url);
            self.api_url = api_url;
        }
        if let Ok(api_key) = std::env::var("LINKSHELF_API_KEY") {
            trace!("Using LINKSHELF_API_KEY from environment");
            self.api_key = api_key;
        }
        if let Ok(table) = std::env::var("LINKSHELF_TABLE") {
            trace!("Using LINKSHELF_TABLE from environment: {}", table);
            self.table = table;
        }
        if let Ok(session_file) = std::env::var("LINKSHELF_SESSION_FILE") {
            trace!("Using LINKSHELF_SESSION_FILE from environment: {}", session_file);
            self.session_file = session_file;
        }
        if let Ok(timeout) = std::env::var("LINKSHELF_TIMEOUT_MS") {
            self.timeout_ms = timeout.parse().map_err(|_| {
                DomainError::Other(format!("LINKSHELF_TIMEOUT_MS is not a number: {}", timeout))
            })?;
        }
        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/linkshelf/config.toml"))
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let config_text = std::fs::read_to_string(path)?;
    toml::from_str::<Settings>(&config_text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Defaults, then the config file, then environment variables.
///
/// An explicitly given config file must exist and parse; the default one is
/// optional and skipped when unreadable.
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_path {
        Some(path) => read_config_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_config_file(&path).unwrap_or_else(|e| {
                debug!("Ignoring default config file: {}", e);
                Settings::default()
            }),
            _ => Settings::default(),
        },
    };

    settings.apply_env()?;

    trace!("Settings loaded: api_url={}, table={}", settings.api_url, settings.table);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
