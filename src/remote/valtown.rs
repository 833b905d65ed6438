//! remote::valtown
//!
//! Val Town implementation of [`ValSource`] over the REST API.
//!
//! # Endpoint
//!
//! `GET {api_base}/v1/alias/{owner}/{name}` with a bearer token. The response
//! body carries `name`, `code` and `readme`; other fields are ignored.
//!
//! # Rate Limiting
//!
//! Returns `FetchError::RateLimited` on 429. There is no automatic retry.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{FetchError, RemoteArtifact, ValSource};
use crate::core::types::ArtifactIdentity;
use crate::credentials::Credential;

/// Default Val Town API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.val.town";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("valexport/", env!("CARGO_PKG_VERSION"));

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(alias = "error")]
    message: String,
}

/// Val Town API client.
#[derive(Debug, Clone)]
pub struct ValTownClient {
    client: Client,
    /// API base URL (overridable for tests and self-hosted mirrors)
    api_base: String,
}

impl Default for ValTownClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ValTownClient {
    /// Create a client against the public API.
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Create a client against a custom API base URL.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// The configured API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build the alias lookup URL for a val.
    fn alias_url(&self, identity: &ArtifactIdentity) -> String {
        format!(
            "{}/v1/alias/{}/{}",
            self.api_base,
            identity.owner(),
            identity.name()
        )
    }

    fn headers(credential: &Credential) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|_| FetchError::AuthFailed("token contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Map a response onto an artifact or a typed error.
    async fn handle_response(
        response: Response,
        identity: &ArtifactIdentity,
    ) -> Result<RemoteArtifact, FetchError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| FetchError::InvalidResponse(e.to_string()));
        }

        let message = match response.json::<ApiErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => FetchError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN => FetchError::AuthFailed(format!("Permission denied: {}", message)),
            StatusCode::NOT_FOUND => FetchError::NotFound(format!("val {}", identity)),
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            _ if status.is_server_error() => FetchError::ApiError {
                status: status.as_u16(),
                message: format!("Val Town server error: {}", message),
            },
            _ => FetchError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl ValSource for ValTownClient {
    fn name(&self) -> &'static str {
        "valtown"
    }

    async fn fetch(
        &self,
        identity: &ArtifactIdentity,
        credential: &Credential,
    ) -> Result<RemoteArtifact, FetchError> {
        let url = self.alias_url(identity);
        tracing::debug!(%url, "fetching val");

        let response = self
            .client
            .get(&url)
            .headers(Self::headers(credential)?)
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Self::handle_response(response, identity).await
    }
}
