//! sepa-view CLI application entry point
//!
//! Opens a SEPA credit-transfer file in a full-screen table.
//!
//! # Usage
//!
//! ```bash
//! # Browse a payment file
//! sepa-view payments.xml
//!
//! # Use a different config file and keep a debug log
//! SEPA_VIEW_LOG=debug sepa-view --config ./view.toml --log-file view.log payments.xml
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/sepa-view/config.toml` on Linux) when that file exists.

use sepa_view::{
    SepaViewError,
    cli::{Cli, USAGE},
    config::ViewerConfig,
    logging, sepa,
    ui::SessionApp,
};
use std::process::ExitCode;

type Result<T> = std::result::Result<T, SepaViewError>;

/// Everything up to the session: logging, configuration, key bindings
fn prepare(cli: &Cli) -> Result<SessionApp> {
    if let Some(log_file) = logging::resolve_log_file(cli.log_file.as_deref()) {
        logging::init(&log_file).map_err(SepaViewError::Logging)?;
    }

    let config = match &cli.config {
        Some(path) => ViewerConfig::load_from(path)?,
        None => ViewerConfig::load()?,
    };
    tracing::debug!(?config, "configuration loaded");

    Ok(SessionApp::from_config(&config)?)
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let path = match cli.input_file() {
        Ok(path) => path,
        Err(SepaViewError::MissingArgument) => {
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = match prepare(&cli) {
        Ok(app) => app,
        Err(e) => {
            println!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Parse failures are shown inside the session rather than aborting.
    let state = app.session(sepa::parse_file(path));

    if let Err(e) = app.run(state) {
        tracing::error!(error = %e, "session failed");
        println!("Error running program: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
