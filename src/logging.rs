//! Sets up logging for the command line tools.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::Error;

/// The log level used when `RUST_LOG` is not set and verbose output is off.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global tracing subscriber.
///
/// Logs are written to stderr so they never mix with command output. The
/// level comes from `RUST_LOG`, falling back to [DEFAULT_LOG_LEVEL], and
/// `verbose` forces the `debug` level. When `log_file` is given, every event
/// at `debug` level or above is also appended to that file.
///
/// # Errors
/// Returns an [Error::LoggingError] if the log file cannot be opened or a
/// global subscriber is already installed.
pub fn setup_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), Error> {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter(verbose));

    let debug_log = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .try_init()
        .map_err(|error| Error::LoggingError(error.to_string()))
}

fn stderr_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, Error> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| Error::LoggingError(format!("could not open {path:?}: {error}")))
}
