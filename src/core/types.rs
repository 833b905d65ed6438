//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ArtifactIdentity`] - The (owner, name) pair that names a val
//!
//! # Validation
//!
//! An identity can only be built by [`ArtifactIdentity::resolve`] (from a
//! platform URL) or [`ArtifactIdentity::new`] (from parts). Both reject empty
//! segments, so an invalid identity cannot be represented.
//!
//! # Examples
//!
//! ```
//! use valexport::core::types::ArtifactIdentity;
//!
//! let id = ArtifactIdentity::resolve("https://www.val.town/v/alice/scrape").unwrap();
//! assert_eq!(id.owner(), "alice");
//! assert_eq!(id.name(), "scrape");
//!
//! assert!(ArtifactIdentity::resolve("https://www.val.town/x/alice/scrape").is_err());
//! assert!(ArtifactIdentity::resolve("https://www.val.town/v/alice").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Literal first path segment that marks a val URL.
pub const VAL_PATH_MARKER: &str = "v";

/// Errors from identity resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("invalid val URL format: {0}")]
    InvalidIdentifierFormat(String),
}

/// The stable identity of a val: the account that owns it and its name.
///
/// Immutable once constructed. Both fields are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactIdentity {
    owner: String,
    name: String,
}

impl ArtifactIdentity {
    /// Build an identity from its parts.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidIdentifierFormat` if either part is empty
    /// or contains a `/`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, IdentityError> {
        let owner = owner.into();
        let name = name.into();
        for (label, part) in [("owner", &owner), ("name", &name)] {
            if part.is_empty() {
                return Err(IdentityError::InvalidIdentifierFormat(format!(
                    "{} cannot be empty",
                    label
                )));
            }
            if part.contains('/') {
                return Err(IdentityError::InvalidIdentifierFormat(format!(
                    "{} cannot contain '/': {}",
                    label, part
                )));
            }
        }
        Ok(Self { owner, name })
    }

    /// Resolve a platform URL such as `https://www.val.town/v/alice/scrape`.
    ///
    /// The URL path is split on `/` with empty segments discarded, so leading,
    /// trailing and doubled slashes are tolerated. The result must be exactly
    /// three segments, the first being [`VAL_PATH_MARKER`].
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidIdentifierFormat` for a malformed URL, the
    /// wrong number of segments, or the wrong marker.
    pub fn resolve(url: &str) -> Result<Self, IdentityError> {
        let parsed = Url::parse(url).map_err(|e| {
            IdentityError::InvalidIdentifierFormat(format!("'{}' is not a URL: {}", url, e))
        })?;

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|parts| parts.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [marker, owner, name] if *marker == VAL_PATH_MARKER => Self::new(*owner, *name),
            _ => Err(IdentityError::InvalidIdentifierFormat(format!(
                "expected a path of the form /{}/<owner>/<name>, got '{}'",
                VAL_PATH_MARKER,
                parsed.path()
            ))),
        }
    }

    /// The account that owns the val.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The val's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
