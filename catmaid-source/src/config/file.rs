//! INI configuration file loading and saving.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default capacity of each metadata memo table.
pub const DEFAULT_METADATA_ENTRIES: u64 = 1024;

/// Errors that can occur while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("failed to read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// The file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A setting has a value of the wrong form.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    /// No platform configuration directory is available.
    #[error("cannot determine configuration directory")]
    NoConfigDir,
}

/// Settings consumed by the HTTP client and metadata fetcher.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Maximum number of memoized responses per metadata kind.
    pub metadata_entries: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            metadata_entries: DEFAULT_METADATA_ENTRIES,
        }
    }
}

fn default_user_agent() -> String {
    format!("catmaid-source/{}", env!("CARGO_PKG_VERSION"))
}

/// Contents of the configuration file.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigFile {
    /// Default server address used when none is given on the command line.
    pub server_url: Option<String>,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// `User-Agent` header value.
    pub user_agent: String,

    /// Capacity of each metadata memo table.
    pub metadata_entries: u64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            server_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            metadata_entries: DEFAULT_METADATA_ENTRIES,
        }
    }
}

/// Location of the configuration file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("catmaid-source").join("config.ini"))
        .ok_or(ConfigError::NoConfigDir)
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

impl ConfigFile {
    /// Load the configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load the configuration from `path`, falling back to defaults when
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = Self::default();

        if let Some(section) = ini.section(Some("server")) {
            config.server_url = section
                .get("url")
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string);
        }

        if let Some(section) = ini.section(Some("http")) {
            if let Some(value) = section.get("timeout_secs") {
                config.timeout_secs = parse_u64("http.timeout_secs", value)?;
            }
            if let Some(value) = section.get("user_agent") {
                config.user_agent = value.trim().to_string();
            }
        }

        if let Some(section) = ini.section(Some("cache")) {
            if let Some(value) = section.get("metadata_entries") {
                config.metadata_entries = parse_u64("cache.metadata_entries", value)?;
            }
        }

        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut ini = Ini::new();
        if let Some(url) = &self.server_url {
            ini.with_section(Some("server")).set("url", url.as_str());
        }
        ini.with_section(Some("http"))
            .set("timeout_secs", self.timeout_secs.to_string())
            .set("user_agent", self.user_agent.as_str());
        ini.with_section(Some("cache"))
            .set("metadata_entries", self.metadata_entries.to_string());

        ini.write_to_file(path).map_err(write_err)
    }

    /// Settings for the HTTP client and metadata fetcher.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            metadata_entries: self.metadata_entries,
        }
    }

    /// All settings as `(section.key, value)` pairs, in file order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("server.url", self.server_url.clone().unwrap_or_default()),
            ("http.timeout_secs", self.timeout_secs.to_string()),
            ("http.user_agent", self.user_agent.clone()),
            ("cache.metadata_entries", self.metadata_entries.to_string()),
        ]
    }
}
