//! remote::mock
//!
//! Mock val source for deterministic testing.
//!
//! # Design
//!
//! Vals are held in memory keyed by `owner/name`. Every fetch is recorded so
//! tests can check the identity and token the pipeline passed through, and a
//! failure can be injected for error-path tests.
//!
//! # Example
//!
//! ```
//! use valexport::core::types::ArtifactIdentity;
//! use valexport::credentials::Credential;
//! use valexport::remote::mock::MockValSource;
//! use valexport::remote::{RemoteArtifact, ValSource};
//!
//! # tokio_test::block_on(async {
//! let id = ArtifactIdentity::new("alice", "scrape").unwrap();
//! let source = MockValSource::new().with_val(
//!     &id,
//!     RemoteArtifact {
//!         name: "scrape".to_string(),
//!         code: "export {}".to_string(),
//!         readme: None,
//!     },
//! );
//!
//! let token = Credential::new("abc").unwrap();
//! let val = source.fetch(&id, &token).await.unwrap();
//! assert_eq!(val.code, "export {}");
//! assert_eq!(source.fetches().len(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{FetchError, RemoteArtifact, ValSource};
use crate::core::types::ArtifactIdentity;
use crate::credentials::Credential;

/// Mock val source.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockValSource {
    inner: Arc<Mutex<MockValSourceInner>>,
}

#[derive(Debug, Default)]
struct MockValSourceInner {
    vals: HashMap<String, RemoteArtifact>,
    fail_with: Option<FetchError>,
    fetches: Vec<RecordedFetch>,
}

/// A recorded call to [`ValSource::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFetch {
    pub identity: ArtifactIdentity,
    pub token: String,
}

impl MockValSource {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a val that fetches of `identity` will return.
    pub fn with_val(self, identity: &ArtifactIdentity, artifact: RemoteArtifact) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.vals.insert(identity.to_string(), artifact);
        }
        self
    }

    /// Make every fetch fail with `error`.
    pub fn fail_with(self, error: FetchError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_with = Some(error);
        }
        self
    }

    /// All fetches made so far.
    pub fn fetches(&self) -> Vec<RecordedFetch> {
        let inner = self.inner.lock().unwrap();
        inner.fetches.clone()
    }
}

#[async_trait]
impl ValSource for MockValSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(
        &self,
        identity: &ArtifactIdentity,
        credential: &Credential,
    ) -> Result<RemoteArtifact, FetchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetches.push(RecordedFetch {
            identity: identity.clone(),
            token: credential.expose().to_string(),
        });

        if let Some(err) = &inner.fail_with {
            return Err(err.clone());
        }

        inner
            .vals
            .get(&identity.to_string())
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("val {}", identity)))
    }
}
