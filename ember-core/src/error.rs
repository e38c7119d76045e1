//! Core error types for Ember domain logic
//!
//! These errors represent domain-level failures, not I/O or CLI errors.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    #[error("Index {index} is out of range for a list of {len} task(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
