//! build::mock
//!
//! Mock package builder for deterministic testing.
//!
//! Records every request together with the merged options and the staged
//! source as it existed on disk when the build ran. Can be told to fail.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use super::traits::{BuildError, BuildRequest, PackageBuilder};

/// Mock builder.
#[derive(Debug, Clone, Default)]
pub struct MockBuilder {
    inner: Arc<Mutex<MockBuilderInner>>,
}

#[derive(Debug, Default)]
struct MockBuilderInner {
    fail_with: Option<String>,
    builds: Vec<RecordedBuild>,
}

/// A recorded call to [`PackageBuilder::build`].
#[derive(Debug, Clone)]
pub struct RecordedBuild {
    pub request: BuildRequest,
    /// Result of [`BuildRequest::options`].
    pub options: Value,
    /// Contents of the entry point at build time, `None` if unreadable.
    pub staged_source: Option<String>,
    /// Whether the output directory existed and was empty at build time.
    pub out_dir_was_empty: bool,
}

impl MockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every build fail with `diagnostics`.
    pub fn fail_with(self, diagnostics: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_with = Some(diagnostics.into());
        }
        self
    }

    /// All builds run so far.
    pub fn builds(&self) -> Vec<RecordedBuild> {
        let inner = self.inner.lock().unwrap();
        inner.builds.clone()
    }
}

#[async_trait]
impl PackageBuilder for MockBuilder {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn build(&self, request: &BuildRequest) -> Result<(), BuildError> {
        let staged_source = tokio::fs::read_to_string(&request.entry_point).await.ok();
        let out_dir_was_empty = match std::fs::read_dir(&request.out_dir) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => false,
        };

        let mut inner = self.inner.lock().unwrap();
        inner.builds.push(RecordedBuild {
            request: request.clone(),
            options: request.options(),
            staged_source,
            out_dir_was_empty,
        });

        match &inner.fail_with {
            Some(diagnostics) => Err(BuildError::Failed {
                status: "exit status: 1".into(),
                diagnostics: diagnostics.clone(),
            }),
            None => Ok(()),
        }
    }
}
