//! Tooling Layer
//!
//! Command-line access to root computation for scripts and CI jobs.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
