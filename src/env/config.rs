//! env::config
//!
//! Configuration file and environment variables.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment variables
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$GGMAN_CONFIG` if set
//! 2. `<config dir>/ggman/config.toml`, where the config dir is the
//!    platform's (`$XDG_CONFIG_HOME`, `~/Library/Application Support`, ...)
//!
//! # Example
//!
//! ```toml
//! root = "~/Projects"
//! norm = "smart"
//! canfile = "~/.ggman"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::norm::Norm;

/// Variable naming the config file.
pub const GGMAN_CONFIG: &str = "GGMAN_CONFIG";
/// Variable overriding the root folder.
pub const GGROOT: &str = "GGROOT";
/// Variable overriding the normalization.
pub const GGNORM: &str = "GGNORM";
/// Variable overriding the canonical file.
pub const GGMAN_CANFILE: &str = "GGMAN_CANFILE";

/// Every variable ggman reads, with a description.
pub const VARIABLES: &[(&str, &str)] = &[
    (GGROOT, "Folder all repositories are cloned into"),
    (GGNORM, "Normalization of local paths: exact, fold or smart"),
    (GGMAN_CANFILE, "File with canonical url rules"),
    (GGMAN_CONFIG, "Configuration file"),
];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Contents of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Root folder
    pub root: Option<String>,

    /// Path normalization
    pub norm: Option<Norm>,

    /// Canonical file
    pub canfile: Option<String>,
}

/// A loaded config file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed contents
    pub file: ConfigFile,
    /// Where it was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load the config file from its default location.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        let path = match std::env::var_os(GGMAN_CONFIG) {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_path(),
        };
        match path {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded config file");
        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// `<config dir>/ggman/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ggman").join("config.toml"))
    }

    /// The file the config was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Fully resolved settings of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    /// Root folder, absolute.
    pub root: PathBuf,
    /// Normalization of local paths.
    pub norm: Norm,
    /// Canonical file, absolute.
    pub canfile: PathBuf,
    /// Directory the invocation runs in.
    pub workdir: PathBuf,
    /// Config file the values were read from, if any.
    pub config: Option<PathBuf>,
}

impl Parameters {
    /// Resolve from the process environment and the default config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::load()?;
        let workdir = std::env::current_dir()
            .map_err(|e| ConfigError::InvalidValue(format!("working directory: {}", e)))?;
        Self::resolve(
            &config,
            |name| std::env::var(name).ok(),
            dirs::home_dir(),
            workdir,
        )
    }

    /// Resolve `config` overridden by the variables `var` returns.
    ///
    /// Relative paths are taken relative to `workdir`; `~/` expands to `home`.
    pub fn resolve(
        config: &Config,
        var: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
        workdir: PathBuf,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str| var(name).filter(|value| !value.is_empty());

        let root = match var(GGROOT).or_else(|| config.file.root.clone()) {
            Some(root) => expand(&root, home.as_deref(), &workdir)?,
            None => home.as_ref().ok_or(ConfigError::NoHomeDir)?.join("Projects"),
        };

        let norm = match var(GGNORM) {
            Some(norm) => norm.parse().map_err(ConfigError::InvalidValue)?,
            None => config.file.norm.unwrap_or_default(),
        };

        let canfile = match var(GGMAN_CANFILE).or_else(|| config.file.canfile.clone()) {
            Some(canfile) => expand(&canfile, home.as_deref(), &workdir)?,
            None => home.as_ref().ok_or(ConfigError::NoHomeDir)?.join(".ggman"),
        };

        Ok(Self {
            root,
            norm,
            canfile,
            workdir,
            config: config.path().map(Path::to_path_buf),
        })
    }
}

fn expand(path: &str, home: Option<&Path>, workdir: &Path) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home.map(Path::to_path_buf).ok_or(ConfigError::NoHomeDir);
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home.ok_or(ConfigError::NoHomeDir)?.join(rest));
    }
    Ok(workdir.join(path))
}
