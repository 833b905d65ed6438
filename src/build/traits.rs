//! build::traits
//!
//! Build request types and the `PackageBuilder` trait.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::options;
use crate::metadata::PackageMetadata;

/// Errors from the build step.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The build tool could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Talking to the running build tool failed.
    #[error("build tool I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The build options could not be serialized.
    #[error("invalid build options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// The build tool exited unsuccessfully.
    #[error("build failed ({status}): {diagnostics}")]
    Failed {
        /// Exit status as reported by the OS
        status: String,
        /// Captured diagnostics (stderr)
        diagnostics: String,
    },
}

/// Package manager the generated package targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    #[default]
    Pnpm,
}

impl PackageManager {
    /// Name as used in configuration and by the build tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime shims injected into the generated package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShimOptions {
    /// Shim the `Deno` global namespace.
    pub deno: bool,
}

impl Default for ShimOptions {
    fn default() -> Self {
        Self { deno: true }
    }
}

/// Everything the build tool needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    /// Staged source file.
    pub entry_point: PathBuf,
    /// Directory the package is written to.
    pub out_dir: PathBuf,
    pub package_manager: PackageManager,
    pub shims: ShimOptions,
    /// Default `package.name`.
    pub package_name: String,
    /// Default `package.version`.
    pub package_version: String,
    /// Metadata extracted from the readme, overlaid on the defaults.
    pub overlay: PackageMetadata,
}

impl BuildRequest {
    /// The merged options object handed to the build tool.
    ///
    /// See [`options::build_options`] for the precedence rules.
    pub fn options(&self) -> Value {
        options::build_options(self)
    }
}

/// The build collaborator: turns a staged source file into a package.
#[async_trait]
pub trait PackageBuilder: Send + Sync {
    /// Get the builder name (e.g., "dnt", "mock").
    fn name(&self) -> &'static str;

    /// Build the package described by `request` into `request.out_dir`.
    async fn build(&self, request: &BuildRequest) -> Result<(), BuildError>;
}
