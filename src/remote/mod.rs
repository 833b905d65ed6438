//! remote
//!
//! Abstraction for the platform that hosts vals.
//!
//! # Architecture
//!
//! The `ValSource` trait defines the one operation the exporter needs: fetch
//! a val's source and readme by identity. The pipeline takes a
//! `&dyn ValSource` rather than importing a concrete client.
//!
//! # Modules
//!
//! - `traits`: Core `ValSource` trait, `RemoteArtifact` and `FetchError`
//! - [`valtown`]: Val Town REST implementation
//! - [`mock`]: Mock implementation for deterministic testing

pub mod mock;
mod traits;
pub mod valtown;

pub use traits::*;
pub use valtown::ValTownClient;
