//! Tooling & Integration Layer
//!
//! Command-line entry points and text rendering for catalogs.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
