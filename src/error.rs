//! # Error Types
//!
//! This module defines error types used throughout the escpos-net library.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for escpos-net operations
#[derive(Debug, Error)]
pub enum EscPosError {
    /// A parameter was out of range. Nothing was appended to the job buffer.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The operation is not legal in the session's transmission mode
    #[error("Mode violation: {0}")]
    ModeViolation(String),

    /// Delivery to the printer failed. The job buffer is left intact.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No encoder is known for the requested code page id
    #[error("Unsupported code page: {0}")]
    EncodingUnsupported(u16),

    /// Image loading or conversion error
    #[error("Image error: {0}")]
    Image(String),

    /// Malformed job description
    #[error("Job error: {0}")]
    Job(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failures at the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The host name did not resolve to any socket address
    #[error("Failed to resolve {addr}: {source}")]
    Resolve {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The printer refused or did not accept the connection
    #[error("Failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The connection broke while the job was being written
    #[error("Write to {addr} failed: {source}")]
    WriteFailed {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Connect or send did not complete within the endpoint timeout
    #[error("Timed out after {timeout:?} talking to {addr}")]
    Timeout { addr: String, timeout: Duration },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, EscPosError>;

pub(crate) fn invalid(message: impl Into<String>) -> EscPosError {
    EscPosError::InvalidParameter(message.into())
}
