//! engine
//!
//! Orchestrates the export: Resolve → Authenticate → Fetch → Stage → Build →
//! Report → Clean up.
//!
//! # Architecture
//!
//! - [`pipeline`] sequences the steps against injected collaborators
//! - [`guard`] wraps each step and routes failures to a handler
//! - [`staging`] owns the temporary directory and output directory clearing
//!
//! Nothing in this module terminates the process. Failures come back as
//! [`PipelineError`] and the CLI decides the exit status.

pub mod guard;
pub mod pipeline;
pub mod staging;

pub use pipeline::{ExportReport, Pipeline};

use std::path::PathBuf;

use thiserror::Error;

use crate::build::BuildError;
use crate::core::types::IdentityError;
use crate::credentials::CredentialError;
use crate::remote::FetchError;

/// Errors from a pipeline run.
///
/// Every variant except `CleanupFailure` is terminal. `CleanupFailure` is
/// only ever reported as a warning.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidIdentifierFormat(#[from] IdentityError),

    #[error(transparent)]
    MissingCredential(#[from] CredentialError),

    #[error("failed to fetch val: {0}")]
    FetchFailed(#[from] FetchError),

    #[error("failed to stage '{path}': {source}")]
    StagingIoFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    BuildFailed(#[from] BuildError),

    #[error("failed to remove temporary directory '{path}': {source}")]
    CleanupFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidIdentifierFormat(_) => "invalid_identifier_format",
            PipelineError::MissingCredential(_) => "missing_credential",
            PipelineError::FetchFailed(_) => "fetch_failed",
            PipelineError::StagingIoFailure { .. } => "staging_io_failure",
            PipelineError::BuildFailed(_) => "build_failed",
            PipelineError::CleanupFailure { .. } => "cleanup_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_messages() {
        let cleanup = PipelineError::CleanupFailure {
            path: PathBuf::from("/tmp/x"),
            source: std::io::Error::other("busy"),
        };
        assert_eq!(cleanup.kind(), "cleanup_failure");
        assert!(cleanup.to_string().starts_with("failed to remove temporary directory"));

        let fetch = PipelineError::from(FetchError::RateLimited);
        assert_eq!(fetch.kind(), "fetch_failed");
        assert_eq!(fetch.to_string(), "failed to fetch val: rate limited");
    }

    #[test]
    fn identity_message_passes_through() {
        let err = PipelineError::from(IdentityError::InvalidIdentifierFormat("bad".into()));
        assert_eq!(err.kind(), "invalid_identifier_format");
        assert_eq!(err.to_string(), "invalid val URL format: bad");
    }

    #[test]
    fn credential_message_passes_through() {
        let err = PipelineError::from(CredentialError::MissingCredential {
            var: "VALTOWN_TOKEN".into(),
        });
        assert_eq!(err.to_string(), "please set env var VALTOWN_TOKEN");
    }
}
