//! Error types for the Aurora3D engine
//!
//! This module defines the error taxonomy used throughout the engine:
//! registry naming errors, render-pass compilation errors, asset decoding
//! errors and GPU API failures.

use std::fmt;

/// Result type for Aurora3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Aurora3D engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A name is already registered in the target registry
    DuplicateName(String),

    /// A name is not registered in the target registry
    NotFound(String),

    /// Deletion attempted while the object is still referenced
    /// (attachment ref-count > 0, or a framebuffer built against a render pass)
    StillReferenced(String),

    /// A builder references a name that was never declared
    UnresolvedReference(String),

    /// A resource description is internally inconsistent
    /// (attachment count or extent mismatch, empty binding list)
    InvalidDescription(String),

    /// A source asset is malformed or unreadable
    Decode(String),

    /// The underlying GPU API reported a failure
    DeviceCall(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Initialization failed (device bootstrap, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateName(msg) => write!(f, "Duplicate name: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::StillReferenced(msg) => write!(f, "Still referenced: {}", msg),
            Error::UnresolvedReference(msg) => write!(f, "Unresolved reference: {}", msg),
            Error::InvalidDescription(msg) => write!(f, "Invalid description: {}", msg),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::DeviceCall(msg) => write!(f, "Device call failed: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
