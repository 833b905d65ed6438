//! engine::staging
//!
//! Temporary staging of fetched source, and output directory clearing.
//!
//! # Invariants
//!
//! - A [`StagingArea`] is a uniquely named directory holding exactly one file,
//!   `<val name>.ts`.
//! - The directory is removed when the area is closed or dropped. Closing
//!   reports removal failures; dropping swallows them.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use super::PipelineError;

/// Prefix of staging directory names.
const STAGING_PREFIX: &str = "valexport-";

/// Extension of the staged source file.
const SOURCE_EXTENSION: &str = "ts";

/// Transient directory containing the staged source.
#[derive(Debug)]
pub struct StagingArea {
    dir: tempfile::TempDir,
    source: PathBuf,
}

impl StagingArea {
    /// Create a staging directory under the system temp dir and write
    /// `code` to `<name>.ts` inside it.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::StagingIoFailure` if `name` is not a plain file
    /// name or any filesystem operation fails.
    pub async fn create(name: &str, code: &str) -> Result<Self, PipelineError> {
        Self::create_in(&std::env::temp_dir(), name, code).await
    }

    /// Like [`create`](Self::create) but under `parent`.
    pub async fn create_in(parent: &Path, name: &str, code: &str) -> Result<Self, PipelineError> {
        let file_name = format!("{}.{}", name, SOURCE_EXTENSION);
        if name.is_empty() || Path::new(&file_name).file_name() != Some(OsStr::new(&file_name)) {
            return Err(PipelineError::StagingIoFailure {
                path: PathBuf::from(&file_name),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "val name is not a valid file name",
                ),
            });
        }

        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(parent)
            .map_err(|source| PipelineError::StagingIoFailure {
                path: parent.to_path_buf(),
                source,
            })?;

        let source = dir.path().join(file_name);
        tokio::fs::write(&source, code)
            .await
            .map_err(|e| PipelineError::StagingIoFailure {
                path: source.clone(),
                source: e,
            })?;

        tracing::debug!(path = %source.display(), "staged source");
        Ok(Self { dir, source })
    }

    /// The staging directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The staged source file.
    pub fn source_path(&self) -> &Path {
        &self.source
    }

    /// Remove the directory and everything in it.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::CleanupFailure` if removal fails.
    pub fn close(self) -> Result<(), PipelineError> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| PipelineError::CleanupFailure { path, source })
    }
}

/// Make `path` an existing, empty directory.
///
/// Creates it if missing, otherwise deletes everything inside it.
pub async fn empty_dir(path: &Path) -> io::Result<()> {
    tokio::fs::create_dir_all(path).await?;

    let mut entries = tokio::fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let entry_path = entry.path();
        if entry.file_type().await?.is_dir() {
            tokio::fs::remove_dir_all(&entry_path).await?;
        } else {
            tokio::fs::remove_file(&entry_path).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn create_writes_named_source_file() {
        let parent = TempDir::new().unwrap();
        let area = StagingArea::create_in(parent.path(), "scrape", "export const x = 1;")
            .await
            .unwrap();

        assert_eq!(area.source_path(), area.path().join("scrape.ts"));
        assert_eq!(
            std::fs::read_to_string(area.source_path()).unwrap(),
            "export const x = 1;"
        );
        assert!(area
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(STAGING_PREFIX));
    }

    #[tokio::test]
    async fn areas_are_unique() {
        let parent = TempDir::new().unwrap();
        let a = StagingArea::create_in(parent.path(), "v", "").await.unwrap();
        let b = StagingArea::create_in(parent.path(), "v", "").await.unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn close_removes_directory() {
        let parent = TempDir::new().unwrap();
        let area = StagingArea::create_in(parent.path(), "scrape", "x").await.unwrap();
        let dir = area.path().to_path_buf();

        area.close().unwrap();
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn drop_removes_directory() {
        let parent = TempDir::new().unwrap();
        let dir = {
            let area = StagingArea::create_in(parent.path(), "scrape", "x").await.unwrap();
            area.path().to_path_buf()
        };
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn path_like_names_are_rejected() {
        let parent = TempDir::new().unwrap();
        for name in ["", "../escape", "a/b"] {
            let err = StagingArea::create_in(parent.path(), name, "x").await.unwrap_err();
            assert_eq!(err.kind(), "staging_io_failure", "name {:?}", name);
        }
    }

    #[tokio::test]
    async fn missing_parent_is_staging_failure() {
        let parent = TempDir::new().unwrap();
        let missing = parent.path().join("nope");
        let err = StagingArea::create_in(&missing, "scrape", "x").await.unwrap_err();
        assert!(matches!(err, PipelineError::StagingIoFailure { .. }));
    }

    #[tokio::test]
    async fn empty_dir_creates_missing_directory() {
        let parent = TempDir::new().unwrap();
        let out = parent.path().join("npm");
        empty_dir(&out).await.unwrap();
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn empty_dir_clears_contents() {
        let parent = TempDir::new().unwrap();
        let out = parent.path().join("npm");
        std::fs::create_dir_all(out.join("esm/nested")).unwrap();
        std::fs::write(out.join("package.json"), "{}").unwrap();
        std::fs::write(out.join("esm/nested/mod.js"), "").unwrap();

        empty_dir(&out).await.unwrap();

        assert!(out.is_dir());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }
}
