//! Logger setup for the command-line tool

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start logging to stderr
///
/// `RUST_LOG` overrides the default level. The returned handle must be kept
/// alive for as long as logging is wanted.
pub fn init(verbose: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    let spec = if verbose { "debug" } else { "info" };
    Logger::try_with_env_or_str(spec)?
        .format(flexi_logger::default_format)
        .start()
}
