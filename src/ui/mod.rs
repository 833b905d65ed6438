//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Message formatting and display

pub mod output;
