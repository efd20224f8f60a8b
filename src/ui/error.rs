//! UI error types

use thiserror::Error;

/// Errors that can occur while running the interactive session
#[derive(Debug, Error)]
pub enum UiError {
    /// Invalid configuration (e.g. an unparseable key binding)
    #[error("Invalid UI configuration: {0}")]
    InvalidConfig(String),

    /// IO error while drawing or reading terminal events
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors reported by a clipboard write
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard could be opened on this system
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard rejected the write
    #[error("{0}")]
    Write(String),

    /// The background writer stopped before reporting back
    #[error("clipboard worker stopped unexpectedly")]
    WorkerLost,
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
