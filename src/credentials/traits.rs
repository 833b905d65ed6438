//! credentials::traits
//!
//! Environment access trait and the credential value type.
//!
//! # Design
//!
//! The pipeline never calls `std::env` directly. It receives an
//! [`Environment`] so that tests can supply variables from a map instead of
//! mutating the real process environment.
//!
//! # Security
//!
//! A [`Credential`] is never logged. Its `Debug` output is redacted and it has
//! no `Display` impl.

use std::collections::HashMap;

/// Read-only view of environment variables.
pub trait Environment: Send + Sync {
    /// Get a variable's value, `None` if unset or not valid unicode.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// An opaque bearer token. Always non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, `None` if it is empty.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// The raw token. Do not log or print it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        assert!(Credential::new("").is_none());
        assert_eq!(Credential::new("abc").unwrap().expose(), "abc");
    }

    #[test]
    fn debug_is_redacted() {
        let cred = Credential::new("super-secret").unwrap();
        let shown = format!("{:?}", cred);
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("redacted"));
    }

    #[test]
    fn map_environment_lookup() {
        let mut env = HashMap::new();
        env.insert("A".to_string(), "1".to_string());
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("B"), None);
    }
}
