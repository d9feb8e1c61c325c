//! Core types and utilities
//!
//! This module contains error types and application-wide constants.

pub mod constants;
pub mod error;

// Re-export commonly used items
pub use error::{LinkProbeError, Result};
