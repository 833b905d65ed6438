//! build
//!
//! Conversion of a staged val into a Node package.
//!
//! # Architecture
//!
//! The pipeline hands a [`BuildRequest`] to a `&dyn PackageBuilder`. The
//! request carries the computed paths and defaults plus the readme metadata;
//! [`BuildRequest::options`] merges them into the options object the build
//! tool receives.
//!
//! # Modules
//!
//! - `traits`: `PackageBuilder`, `BuildRequest`, `BuildError`
//! - [`options`]: defaults and metadata overlay
//! - [`dnt`]: dnt-under-Deno implementation
//! - [`mock`]: recording mock for tests

pub mod dnt;
pub mod mock;
pub mod options;
mod traits;

pub use dnt::DntBuilder;
pub use traits::*;
