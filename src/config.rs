//! Server settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment overrides. The file is `issue-tracker.toml` in the working
//! directory unless `ISSUE_TRACKER_CONFIG` names another path. A missing
//! default file is ignored; a missing explicit file is an error.
//!
//! ```toml
//! bind_addr = "127.0.0.1:9090"
//! log_filter = "issue_tracker=debug,tower_http=info"
//! ```

use std::{
    fs, io,
    net::{AddrParseError, SocketAddr},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Default settings file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "issue-tracker.toml";
/// Environment variable naming an explicit settings file.
pub const CONFIG_PATH_ENV: &str = "ISSUE_TRACKER_CONFIG";
/// Environment override for [`Settings::bind_addr`].
pub const BIND_ADDR_ENV: &str = "ISSUE_TRACKER__BIND_ADDR";
/// Environment override for [`Settings::log_filter`].
pub const LOG_FILTER_ENV: &str = "ISSUE_TRACKER__LOG_FILTER";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read config file {}", .path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid TOML for [`Settings`].
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The bind address is not a socket address.
    #[error("invalid bind address `{value}`")]
    InvalidBindAddr {
        /// Configured value.
        value: String,
        /// Underlying parse error.
        #[source]
        source: AddrParseError,
    },
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Address the server listens on.
    pub bind_addr: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_owned(),
            log_filter: "info".to_owned(),
        }
    }
}

impl Settings {
    /// Loads settings from the process environment and working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the settings file cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&|key| std::env::var(key).ok())
    }

    /// Loads settings using `env` to look up environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the settings file cannot be read or
    /// parsed.
    pub fn load_with(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = match env(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => match Self::from_file(Path::new(DEFAULT_CONFIG_FILE)) {
                Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    Self::default()
                }
                other => other?,
            },
        };
        settings.apply_overrides(env);
        Ok(settings)
    }

    /// Reads settings from a TOML file; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    fn apply_overrides(&mut self, env: &dyn Fn(&str) -> Option<String>) {
        if let Some(value) = env(BIND_ADDR_ENV) {
            self.bind_addr = value;
        }
        if let Some(value) = env(LOG_FILTER_ENV) {
            self.log_filter = value;
        }
    }

    /// Parses [`Settings::bind_addr`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }
}
