//! sepa-view - A terminal viewer for SEPA credit-transfer files
//!
//! This library decodes pain.001.001.03 XML documents into a fixed list of
//! labeled fields and presents them in an interactive table from which
//! single values can be copied to the clipboard.

use std::path::PathBuf;
use thiserror::Error;

pub mod cli;
pub mod config;
pub mod logging;
pub mod sepa;
pub mod ui;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SepaViewError {
    /// No input file was given on the command line
    #[error("missing file argument")]
    MissingArgument,
    /// The input path does not name an existing file
    #[error("File '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),
    /// Document decoding error
    #[error("Parse error: {0}")]
    Parse(#[from] sepa::ParseError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Terminal session error
    #[error("{0}")]
    Ui(#[from] ui::UiError),
    /// Log file could not be set up
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for top-level operations
pub type Result<T> = std::result::Result<T, SepaViewError>;
