//! Command-line interface definitions and parsing
//!
//! The viewer takes a single positional path. It is declared optional so a
//! missing path prints the short usage text and exits 1 instead of going
//! through clap's own error path.
//!
//! # Examples
//!
//! ```
//! use sepa_view::cli::Cli;
//! use std::path::Path;
//!
//! let cli = Cli::parse_from_iter(["sepa-view", "payments.xml", "--log-file", "view.log"]);
//! assert_eq!(cli.file.as_deref(), Some(Path::new("payments.xml")));
//! assert_eq!(cli.log_file.as_deref(), Some(Path::new("view.log")));
//! ```

use crate::{Result, SepaViewError};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Printed when no file is given
pub const USAGE: &str = "Usage: sepa-view <filepath>\nExample: sepa-view example/SEPA_Example_2024.xml";

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "sepa-view")]
#[command(about = "Browse the fields of a SEPA credit-transfer XML file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SEPA pain.001 XML file to open
    #[arg(value_name = "FILEPATH")]
    pub file: Option<PathBuf>,

    /// Read settings from this file instead of the default location
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append diagnostic logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse from an explicit argument list
    #[must_use]
    pub fn parse_from_iter<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(args)
    }

    /// The input path, which must exist
    ///
    /// # Errors
    ///
    /// Returns `SepaViewError::MissingArgument` if no path was given and
    /// `SepaViewError::FileNotFound` if nothing exists at it.
    pub fn input_file(&self) -> Result<&Path> {
        let path = self.file.as_deref().ok_or(SepaViewError::MissingArgument)?;
        ensure_exists(path)?;
        Ok(path)
    }
}

/// Check that something exists at `path`
///
/// Directories pass this check and fail later when the document is read.
///
/// # Errors
///
/// Returns `SepaViewError::FileNotFound` if the path does not exist.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(SepaViewError::FileNotFound(path.to_path_buf()))
    }
}
