//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Values are validated after parsing: the token variable name must be
//! non-empty and the package manager must be one the build tool knows.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::build::dnt::{DEFAULT_DENO, DEFAULT_DNT_MODULE};
use crate::build::{PackageManager, ShimOptions};
use crate::credentials::DEFAULT_TOKEN_VAR;
use crate::remote::valtown::DEFAULT_API_BASE;

/// Default output directory for the generated package.
pub const DEFAULT_OUT_DIR: &str = "./npm";

/// Default `package.version` when the readme does not set one.
pub const DEFAULT_PACKAGE_VERSION: &str = "1.0.0";

/// Export configuration.
///
/// # Example
///
/// ```toml
/// token_var = "VALTOWN_TOKEN"
/// out_dir = "./npm"
/// package_manager = "pnpm"
/// api_base = "https://api.val.town"
/// deno = "deno"
/// dnt_module = "https://deno.land/x/dnt/mod.ts"
/// package_version = "1.0.0"
///
/// [shims]
/// deno = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Environment variable holding the API token
    pub token_var: String,

    /// Directory the package is written to (cleared before each build)
    pub out_dir: PathBuf,

    /// Package manager targeted by the generated package
    pub package_manager: PackageManager,

    /// Val Town API base URL
    pub api_base: String,

    /// Deno executable used to run the build
    pub deno: String,

    /// Module specifier dnt is imported from
    pub dnt_module: String,

    /// Default package version
    pub package_version: String,

    /// Runtime shims
    pub shims: ShimOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            token_var: DEFAULT_TOKEN_VAR.to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            package_manager: PackageManager::default(),
            api_base: DEFAULT_API_BASE.to_string(),
            deno: DEFAULT_DENO.to_string(),
            dnt_module: DEFAULT_DNT_MODULE.to_string(),
            package_version: DEFAULT_PACKAGE_VERSION.to_string(),
            shims: ShimOptions::default(),
        }
    }
}

impl ExportConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_var.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "token_var cannot be empty".into(),
            ));
        }
        if self.token_var.contains('=') || self.token_var.contains('\0') {
            return Err(ConfigError::InvalidValue(format!(
                "token_var '{}' is not a valid variable name",
                self.token_var
            )));
        }
        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("out_dir cannot be empty".into()));
        }
        if self.deno.trim().is_empty() {
            return Err(ConfigError::InvalidValue("deno cannot be empty".into()));
        }
        if self.package_version.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "package_version cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
