//! remote::traits
//!
//! Trait definition for fetching vals from a hosting platform.
//!
//! # Design
//!
//! The `ValSource` trait is async because fetching involves network I/O.
//! The pipeline only sees this trait, never a concrete client, so tests can
//! substitute [`MockValSource`](super::mock::MockValSource).

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::core::types::ArtifactIdentity;
use crate::credentials::Credential;

/// Errors from fetching a val.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The val does not exist or is not visible to the token.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body was not the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A fetched val: its source and optional readme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteArtifact {
    /// The val's name as reported by the platform.
    pub name: String,
    /// TypeScript source.
    pub code: String,
    /// Markdown documentation, if the val has any.
    #[serde(default)]
    pub readme: Option<String>,
}

/// Source of vals.
///
/// # Errors
///
/// Implementations map platform failures onto [`FetchError`]. The token must
/// never appear in an error message.
#[async_trait]
pub trait ValSource: Send + Sync {
    /// Get the source name (e.g., "valtown", "mock").
    fn name(&self) -> &'static str;

    /// Fetch the val named by `identity`, authenticating with `credential`.
    async fn fetch(
        &self,
        identity: &ArtifactIdentity,
        credential: &Credential,
    ) -> Result<RemoteArtifact, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display() {
        assert_eq!(
            FetchError::AuthFailed("expired token".into()).to_string(),
            "authentication failed: expired token"
        );
        assert_eq!(
            FetchError::NotFound("alice/scrape".into()).to_string(),
            "not found: alice/scrape"
        );
        assert_eq!(FetchError::RateLimited.to_string(), "rate limited");
        assert_eq!(
            FetchError::ApiError {
                status: 500,
                message: "boom".into()
            }
            .to_string(),
            "API error: 500 - boom"
        );
    }

    #[test]
    fn artifact_readme_defaults_to_none() {
        let artifact: RemoteArtifact =
            serde_json::from_str(r#"{"name": "scrape", "code": "export {}"}"#).unwrap();
        assert_eq!(artifact.readme, None);

        let artifact: RemoteArtifact =
            serde_json::from_str(r#"{"name": "scrape", "code": "", "readme": null}"#).unwrap();
        assert_eq!(artifact.readme, None);
    }

    #[test]
    fn artifact_ignores_extra_fields() {
        let artifact: RemoteArtifact = serde_json::from_str(
            r##"{"id": "1", "name": "scrape", "code": "x", "readme": "# hi", "privacy": "public"}"##,
        )
        .unwrap();
        assert_eq!(artifact.readme.as_deref(), Some("# hi"));
    }
}
