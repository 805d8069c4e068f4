//! Service configuration.
//!
//! Resolution order, later wins: built-in defaults, the TOML file, then
//! [`Overrides`] gathered from flags and environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Overrides;
use crate::error::{Error, Result};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "contato.toml";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Google spreadsheet, addressed by name or URL.
    Sheets,
    /// Local SQLite table.
    #[default]
    Sqlite,
    /// Process memory; lost on restart.
    Memory,
}

impl Backend {
    /// Lowercase name as written in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sheets => "sheets",
            Backend::Sqlite => "sqlite",
            Backend::Memory => "memory",
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContatoConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage settings.
    pub store: StoreConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: String,
    /// Static asset directory.
    pub static_dir: PathBuf,
    /// Permissive CORS.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            static_dir: PathBuf::from("static"),
            cors: true,
        }
    }
}

/// `[store]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Which backend handles submissions.
    pub backend: Backend,
    /// Service-account credential file (sheets backend).
    pub credential_path: PathBuf,
    /// Spreadsheet to append to (sheets backend).
    ///
    /// A share URL (`.../spreadsheets/d/<key>/...`), `key:<key>`, or a bare
    /// key of 40 or more `[A-Za-z0-9_-]` characters addresses one
    /// spreadsheet directly. Anything else is a name looked up in Drive.
    pub sheet_reference: String,
    /// SQLite connection string (sqlite backend).
    pub database_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            credential_path: PathBuf::from("google_credentials.json"),
            sheet_reference: "megestao".to_string(),
            database_url: "sqlite://contatos.db".to_string(),
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// JSON log lines instead of the human format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,contato=debug".to_string(),
            json: false,
        }
    }
}

impl ContatoConfig {
    /// Picks the file to read: the explicit path, else `contato.toml` in the
    /// working directory if it exists.
    pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            }
        }
    }

    /// Loads the configuration file, or defaults when there is none.
    ///
    /// An explicitly named file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            return Ok(Self::default());
        };
        let content =
            std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parses TOML; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Applies flag and environment overrides.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(bind) = &overrides.bind {
            self.server.bind.clone_from(bind);
        }
        if let Some(dir) = &overrides.static_dir {
            self.server.static_dir.clone_from(dir);
        }
        if overrides.no_cors {
            self.server.cors = false;
        }
        if let Some(backend) = overrides.backend {
            self.store.backend = backend;
        }
        if let Some(path) = &overrides.credentials {
            self.store.credential_path.clone_from(path);
        }
        if let Some(sheet) = &overrides.sheet {
            self.store.sheet_reference.clone_from(sheet);
        }
        if let Some(url) = &overrides.database_url {
            self.store.database_url.clone_from(url);
        }
        if let Some(filter) = &overrides.log_filter {
            self.logging.filter.clone_from(filter);
        }
        if overrides.log_json {
            self.logging.json = true;
        }
    }

    /// Loads the file and applies overrides in one step.
    pub fn resolve(explicit: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = Self::load(explicit)?;
        config.apply_overrides(overrides);
        Ok(config)
    }
}
