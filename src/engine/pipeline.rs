//! engine::pipeline
//!
//! The export pipeline.
//!
//! # Sequence
//!
//! 1. Resolve the val URL into an [`ArtifactIdentity`]
//! 2. Load the API token from the configured variable
//! 3. Fetch the val
//! 4. Stage its code into `<tmp>/valexport-XXXX/<name>.ts`
//! 5. Clear the output directory
//! 6. Extract package metadata from the readme
//! 7. Build
//! 8. Report
//! 9. Remove the staging directory
//!
//! Steps run strictly in order, each wrapped by [`guard`]. Once step 4 has
//! succeeded, step 9 runs whatever happens in steps 5 to 8; a removal failure
//! is a warning and does not change the outcome.

use std::path::PathBuf;

use super::guard::{escalate, guard, guard_async, recover};
use super::staging::{self, StagingArea};
use super::PipelineError;
use crate::build::{BuildRequest, PackageBuilder};
use crate::core::config::ExportConfig;
use crate::core::types::ArtifactIdentity;
use crate::credentials::{load_credential, Environment};
use crate::metadata::{extract_package_metadata, MARKER_KEY};
use crate::remote::{RemoteArtifact, ValSource};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// The val that was exported.
    pub identity: ArtifactIdentity,
    /// Name the generated package was given.
    pub package_name: String,
    /// Directory holding the package.
    pub out_dir: PathBuf,
    /// Whether the readme supplied package metadata.
    pub used_readme_metadata: bool,
}

/// One export run and its collaborators.
pub struct Pipeline<'a> {
    pub source: &'a dyn ValSource,
    pub builder: &'a dyn PackageBuilder,
    pub env: &'a dyn Environment,
    pub config: &'a ExportConfig,
}

impl Pipeline<'_> {
    /// Export the val at `url`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`PipelineError`]. It has already been
    /// reported by the default handler when this returns.
    pub async fn run(&self, url: &str) -> Result<ExportReport, PipelineError> {
        let identity = guard(ArtifactIdentity::resolve(url), escalate)?;
        tracing::debug!(%identity, "resolved val");

        let credential = guard(load_credential(self.env, &self.config.token_var), escalate)?;

        tracing::debug!(source = self.source.name(), "fetching");
        let artifact = guard_async(self.source.fetch(&identity, &credential), escalate).await?;
        drop(credential);
        tracing::debug!(
            name = %artifact.name,
            code_len = artifact.code.len(),
            has_readme = artifact.readme.is_some(),
            "fetched val"
        );

        let staging = guard_async(
            StagingArea::create(&artifact.name, &artifact.code),
            escalate,
        )
        .await?;

        let outcome = self.build_staged(&identity, &artifact, &staging).await;

        let staging_dir = staging.path().to_path_buf();
        guard(staging.close(), recover(()))?;
        tracing::debug!(path = %staging_dir.display(), "removed staging directory");

        outcome
    }

    /// Steps 5 to 8, run while the staging area exists.
    async fn build_staged(
        &self,
        identity: &ArtifactIdentity,
        artifact: &RemoteArtifact,
        staging: &StagingArea,
    ) -> Result<ExportReport, PipelineError> {
        let out_dir = self.config.out_dir.clone();
        guard_async(
            async {
                staging::empty_dir(&out_dir)
                    .await
                    .map_err(|source| PipelineError::StagingIoFailure {
                        path: out_dir.clone(),
                        source,
                    })
            },
            escalate,
        )
        .await?;

        let overlay = extract_package_metadata(artifact.readme.as_deref().unwrap_or(""));
        let used_readme_metadata = !overlay.is_empty();
        tracing::debug!(used_readme_metadata, "extracted package metadata");

        let request = BuildRequest {
            entry_point: staging.source_path().to_path_buf(),
            out_dir: out_dir.clone(),
            package_manager: self.config.package_manager,
            shims: self.config.shims,
            package_name: artifact.name.clone(),
            package_version: self.config.package_version.clone(),
            overlay,
        };
        let package_name = request.options()[MARKER_KEY]["name"]
            .as_str()
            .unwrap_or(&artifact.name)
            .to_string();

        tracing::debug!(builder = self.builder.name(), "building");
        guard_async(self.builder.build(&request), escalate).await?;

        tracing::info!(%identity, package = %package_name, out_dir = %out_dir.display(), "build successful");
        Ok(ExportReport {
            identity: identity.clone(),
            package_name,
            out_dir,
            used_readme_metadata,
        })
    }
}
