//! valexport - Export a Val Town val as a Node-compatible npm package
//!
//! Given the URL of a published val, valexport fetches its source and
//! readme, stages the source as a TypeScript file and runs Deno's `dnt`
//! build tool over it. Package metadata can be supplied from the readme
//! through a fenced `json` block carrying a `"package"` key.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, decides exit status)
//! - [`engine`] - The export pipeline, its fault wrapper and staging area
//! - [`core`] - Val identity and configuration
//! - [`credentials`] - API token lookup from the environment
//! - [`remote`] - Fetching vals from the Val Town API
//! - [`metadata`] - Package metadata extraction from readme text
//! - [`build`] - Build options and the dnt builder
//! - [`ui`] - User-facing output
//!
//! # Guarantees
//!
//! 1. Nothing is fetched unless the URL resolves and a token is present
//! 2. Metadata never relocates the entry point or the output directory
//! 3. The staging directory is removed once staged, whatever the outcome
//! 4. The token is never logged

pub mod build;
pub mod cli;
pub mod core;
pub mod credentials;
pub mod engine;
pub mod metadata;
pub mod remote;
pub mod ui;
