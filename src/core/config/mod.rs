//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (applied by the caller, see [`ExportConfig::apply_overrides`])
//!
//! # Config File Location
//!
//! The first of these is used:
//! 1. `--config <path>` (must exist)
//! 2. `$VALEXPORT_CONFIG` if set (must exist)
//! 3. `valexport.toml` in the working directory, if present
//!
//! With none of them, defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use valexport::core::config;
//! use valexport::credentials::ProcessEnv;
//! use std::path::Path;
//!
//! let loaded = config::load(None, &ProcessEnv, Path::new(".")).unwrap();
//! println!("Token variable: {}", loaded.config.token_var);
//! ```

pub mod schema;

pub use schema::ExportConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::credentials::Environment;

/// Variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "VALEXPORT_CONFIG";

/// Config file looked for in the working directory.
pub const CONFIG_FILE_NAME: &str = "valexport.toml";

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
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: ExportConfig,
    /// The file it came from, `None` for defaults.
    pub path: Option<PathBuf>,
}

/// Command-line overrides applied on top of the loaded file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub out_dir: Option<PathBuf>,
    pub token_var: Option<String>,
}

impl ExportConfig {
    /// Apply CLI overrides, then re-validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if an override is invalid.
    pub fn apply_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = out_dir;
        }
        if let Some(token_var) = overrides.token_var {
            self.token_var = token_var;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Load configuration.
///
/// `explicit` is the `--config` flag; `cwd` is where `valexport.toml` is
/// looked for.
///
/// # Errors
///
/// Returns an error if an explicitly named file is missing, or if any file
/// found cannot be parsed or fails validation. An absent `valexport.toml` is
/// not an error.
pub fn load(
    explicit: Option<&Path>,
    env: &dyn Environment,
    cwd: &Path,
) -> Result<ConfigLoadResult, ConfigError> {
    let path = if let Some(path) = explicit {
        Some(path.to_path_buf())
    } else if let Some(path) = env.var(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        Some(PathBuf::from(path))
    } else {
        Some(cwd.join(CONFIG_FILE_NAME)).filter(|p| p.exists())
    };

    let config = match &path {
        Some(path) => read_config(path)?,
        None => ExportConfig::default(),
    };
    config.validate()?;

    Ok(ConfigLoadResult { config, path })
}

/// Read and parse a config file.
fn read_config(path: &Path) -> Result<ExportConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
