//! engine::guard
//!
//! Uniform call-and-recover wrapper around pipeline steps.
//!
//! # Design
//!
//! A step produces a `Result`. [`guard`] (or [`guard_async`] for steps that
//! await I/O) converts its error into a [`PipelineError`] and hands it to a
//! handler, which either escalates it or recovers with a value:
//!
//! - [`escalate`]: the default. Reports the error and returns it, so the
//!   caller's `?` ends the run.
//! - [`recover`]: logs a warning and substitutes a fallback value.
//!
//! Handlers never exit the process. Only the CLI turns an escalated error
//! into an exit status.
//!
//! # Example
//!
//! ```
//! use valexport::engine::guard::{guard, recover};
//! use valexport::core::types::ArtifactIdentity;
//!
//! let name = guard(
//!     ArtifactIdentity::resolve("not a url").map(|id| id.name().to_string()),
//!     recover(String::from("fallback")),
//! )
//! .unwrap();
//! assert_eq!(name, "fallback");
//! ```

use std::future::Future;

use super::PipelineError;
use crate::ui::output;

/// Run a completed step's result through `on_error`.
pub fn guard<T, E, H>(result: Result<T, E>, on_error: H) -> Result<T, PipelineError>
where
    E: Into<PipelineError>,
    H: FnOnce(PipelineError) -> Result<T, PipelineError>,
{
    result.or_else(|e| on_error(e.into()))
}

/// Await `action`, then run its result through `on_error`.
pub async fn guard_async<T, E, F, H>(action: F, on_error: H) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<PipelineError>,
    H: FnOnce(PipelineError) -> Result<T, PipelineError>,
{
    guard(action.await, on_error)
}

/// Default handler: report the error and hand it back as fatal.
pub fn escalate<T>(err: PipelineError) -> Result<T, PipelineError> {
    tracing::debug!(kind = err.kind(), error = ?err, "step failed");
    output::error(&err);
    Err(err)
}

/// Handler that logs a warning and continues with `fallback`.
pub fn recover<T>(fallback: T) -> impl FnOnce(PipelineError) -> Result<T, PipelineError> {
    move |err| {
        tracing::warn!(kind = err.kind(), "{}", err);
        Ok(fallback)
    }
}
