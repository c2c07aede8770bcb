//! Error types for chronos-core

use thiserror::Error;

/// Main error type for the chronos-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Logging setup error
    #[error("logging error: {0}")]
    Logging(String),

    /// Clipboard write failed
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// A session is already running
    #[error("an observation session is already active")]
    SessionAlreadyActive,

    /// No session is running
    #[error("no observation session is active")]
    SessionNotActive,
}

/// Result type alias for chronos-core
pub type Result<T> = std::result::Result<T, Error>;
