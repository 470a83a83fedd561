//! Error types for the Nebula render core
//!
//! This module defines the error types used throughout the crate,
//! covering command recording, resource binding, and backend encoding.

use std::fmt;

/// Result type for Nebula render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nebula render errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Vulkan, DirectX, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid argument passed to a recording operation
    InvalidArgument(String),

    /// Invalid resource (texture, buffer, pipeline, etc.)
    InvalidResource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
