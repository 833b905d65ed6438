//! credentials
//!
//! Loading the Val Town API token.
//!
//! # Architecture
//!
//! The token comes from an environment variable whose name is configurable
//! (default `VALTOWN_TOKEN`). It is read fresh on every run through the
//! [`Environment`] trait and held only in memory.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use valexport::credentials::load_credential;
//!
//! let mut env = HashMap::new();
//! env.insert("VALTOWN_TOKEN".to_string(), "abc".to_string());
//!
//! let cred = load_credential(&env, "VALTOWN_TOKEN").unwrap();
//! assert_eq!(cred.expose(), "abc");
//! ```

mod traits;

pub use traits::{Credential, Environment, ProcessEnv};

use thiserror::Error;

/// Default name of the variable holding the token.
pub const DEFAULT_TOKEN_VAR: &str = "VALTOWN_TOKEN";

/// Errors from credential loading.
///
/// Note: messages name the variable, never its value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The variable is unset or empty.
    #[error("please set env var {var}")]
    MissingCredential { var: String },
}

/// Load the bearer token from `var_name`.
///
/// # Errors
///
/// Returns `CredentialError::MissingCredential` if the variable is unset or
/// set to the empty string.
pub fn load_credential(env: &dyn Environment, var_name: &str) -> Result<Credential, CredentialError> {
    env.var(var_name)
        .and_then(Credential::new)
        .ok_or_else(|| CredentialError::MissingCredential {
            var: var_name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(name: &str, value: &str) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert(name.to_string(), value.to_string());
        env
    }

    #[test]
    fn unset_variable_is_missing() {
        let env = HashMap::new();
        let err = load_credential(&env, DEFAULT_TOKEN_VAR).unwrap_err();
        assert_eq!(
            err,
            CredentialError::MissingCredential {
                var: "VALTOWN_TOKEN".into()
            }
        );
    }

    #[test]
    fn empty_variable_is_missing() {
        let env = env_with(DEFAULT_TOKEN_VAR, "");
        assert!(matches!(
            load_credential(&env, DEFAULT_TOKEN_VAR),
            Err(CredentialError::MissingCredential { .. })
        ));
    }

    #[test]
    fn set_variable_is_returned() {
        let env = env_with(DEFAULT_TOKEN_VAR, "abc");
        let cred = load_credential(&env, DEFAULT_TOKEN_VAR).unwrap();
        assert_eq!(cred.expose(), "abc");
    }

    #[test]
    fn custom_variable_name() {
        let env = env_with("MY_TOKEN", "xyz");
        assert!(load_credential(&env, DEFAULT_TOKEN_VAR).is_err());
        assert_eq!(load_credential(&env, "MY_TOKEN").unwrap().expose(), "xyz");
    }

    #[test]
    fn error_names_variable_not_value() {
        let err = load_credential(&HashMap::new(), "MY_TOKEN").unwrap_err();
        assert_eq!(err.to_string(), "please set env var MY_TOKEN");
    }
}
