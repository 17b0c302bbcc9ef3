//! Server configuration.
//!
//! Values come from an optional TOML file, then environment variables
//! (a `.env` file is loaded first by the binary), then command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Top-level server configuration.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// Where new words come from.
    #[serde(default)]
    words: WordSourceConfig,
}

/// Word supply selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum WordSourceConfig {
    /// Local JSON word bank. Without a path the built-in bank is used.
    Bank {
        /// Path to the word bank file.
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// Remote Firestore collections.
    Firestore(FirestoreConfig),
}

impl Default for WordSourceConfig {
    fn default() -> Self {
        WordSourceConfig::Bank { path: None }
    }
}

/// Firestore connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Firebase project ID.
    project_id: String,

    /// App ID under `artifacts/`.
    #[serde(default = "default_app_id")]
    app_id: String,

    /// REST endpoint root.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Length of the random jump key.
    #[serde(default = "default_key_length")]
    key_length: usize,

    /// Page size of the fallback listing.
    #[serde(default = "default_fallback_page_size")]
    fallback_page_size: u32,
}

#[instrument]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[instrument]
fn default_port() -> u16 {
    8080
}

#[instrument]
fn default_app_id() -> String {
    "go-hangman-v1".to_string()
}

#[instrument]
fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

#[instrument]
fn default_timeout_secs() -> u64 {
    10
}

#[instrument]
fn default_key_length() -> usize {
    crate::words::DEFAULT_KEY_LENGTH
}

#[instrument]
fn default_fallback_page_size() -> u32 {
    1
}

impl FirestoreConfig {
    /// Creates Firestore settings with defaults for everything but the project.
    pub fn new(project_id: String) -> Self {
        Self {
            project_id,
            app_id: default_app_id(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            key_length: default_key_length(),
            fallback_page_size: default_fallback_page_size(),
        }
    }

    /// Overrides the REST endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the app ID.
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            words: WordSourceConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, then applies process environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file is invalid or an override
    /// does not parse.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                info!("Config file not found at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides read through `lookup`.
    ///
    /// Recognized keys: `HANGMAN_HOST`, `HANGMAN_PORT`, `HANGMAN_WORDS_FILE`,
    /// `FIREBASE_PROJECT_ID`, `FIREBASE_APP_ID`. A Firestore project takes
    /// precedence over a words file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `HANGMAN_PORT` is not a port number.
    #[instrument(skip(self, lookup))]
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("HANGMAN_HOST") {
            debug!(%host, "Host overridden from environment");
            self.host = host;
        }

        if let Some(port) = lookup("HANGMAN_PORT") {
            self.port = port.trim().parse().map_err(|_| {
                warn!(%port, "Invalid HANGMAN_PORT");
                ConfigError::new(format!("HANGMAN_PORT is not a valid port: {}", port))
            })?;
        }

        if let Some(path) = lookup("HANGMAN_WORDS_FILE") {
            debug!(%path, "Word bank file overridden from environment");
            self.words = WordSourceConfig::Bank {
                path: Some(PathBuf::from(path)),
            };
        }

        if let Some(project_id) = lookup("FIREBASE_PROJECT_ID").filter(|p| !p.trim().is_empty()) {
            let mut firestore = match &self.words {
                WordSourceConfig::Firestore(existing) => existing.clone(),
                WordSourceConfig::Bank { .. } => FirestoreConfig::new(project_id.clone()),
            };
            firestore.project_id = project_id;
            if let Some(app_id) = lookup("FIREBASE_APP_ID").filter(|a| !a.trim().is_empty()) {
                firestore.app_id = app_id;
            }
            debug!(project_id = %firestore.project_id, "Firestore selected from environment");
            self.words = WordSourceConfig::Firestore(firestore);
        }

        Ok(())
    }

    /// Overrides the bind address.
    pub fn set_address(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
