//! core
//!
//! Core domain types and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ArtifactIdentity
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod types;
