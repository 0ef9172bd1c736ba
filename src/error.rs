//! Error types for tuplekv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for tuplekv operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    /// Exclusive creation failed because the keyfile already exists.
    /// Kept distinct from `Io` so callers can report "already exists".
    #[error("Key already exists")]
    KeyExists,

    #[error("Key not found")]
    KeyNotFound,

    /// A keyfile that could be opened but not read back as three valid lines.
    #[error("Corrupt keyfile: {0}")]
    Corrupt(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Client side: the server answered with the generic ERROR status.
    #[error("Server reported an error")]
    ServerError,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
