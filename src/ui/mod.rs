//! User interface components
//!
//! This module contains the CLI argument definitions.

pub mod cli;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
