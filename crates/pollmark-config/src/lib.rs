//! Configuration management for Pollmark.
//!
//! Parses `pollmark.toml` with serde and discovers the file in the current
//! directory or its parents. CLI settings are applied on top via
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `render.api_base`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "pollmark.toml";

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the response API base used by rendered widgets.
    pub api_base: Option<String>,
    /// Override whether the showcase document is seeded.
    pub seed_default_document: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Storage settings.
    pub storage: StorageConfig,
    /// Path to the loaded config file, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base path or URL of the response API, as seen by the browser.
    pub api_base: String,
    /// Embed the widget activation script in rendered documents.
    pub embed_activation_script: bool,
    /// HTML-escape question labels.
    pub escape_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_owned(),
            embed_activation_script: true,
            escape_labels: false,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Start with the showcase document under id `default`.
    pub seed_default_document: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seed_default_document: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`POLLMARK_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `pollmark.toml` in the current directory and its parents, falling
    /// back to defaults. CLI settings are applied last and the result is
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, or if
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, parsed or expanded.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(api_base) = &settings.api_base {
            self.render.api_base.clone_from(api_base);
        }
        if let Some(seed) = settings.seed_default_document {
            self.storage.seed_default_document = seed;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_render()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        let api_base = &self.render.api_base;
        require_non_empty(api_base, "render.api_base")?;

        if !api_base.starts_with('/')
            && !api_base.starts_with("http://")
            && !api_base.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "render.api_base must be an absolute path or an http(s) URL".to_owned(),
            ));
        }
        if api_base.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
            return Err(ConfigError::Validation(
                "render.api_base cannot contain whitespace or quotes".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.render.api_base = expand::expand_env(&self.render.api_base, "render.api_base")?;
        Ok(())
    }
}

/// Search for `pollmark.toml` in `start` and its parents.
#[must_use]
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
