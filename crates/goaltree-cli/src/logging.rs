//! Stderr diagnostics, controlled by the GOALTREE_LOG environment variable.
//! Logging failures must never block the actual command.

use flexi_logger::{Logger, LoggerHandle};

pub const ENV_VAR: &str = "GOALTREE_LOG";
const DEFAULT_SPEC: &str = "warn";

/// Starts the logger; the returned handle must stay alive for the duration
/// of the process.
pub fn init() -> Option<LoggerHandle> {
    let spec = std::env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_SPEC.to_string());
    let logger = match Logger::try_with_str(&spec) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("goaltree: invalid {ENV_VAR} value {spec:?}: {err}");
            return None;
        }
    };
    match logger.log_to_stderr().start() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("goaltree: logging disabled: {err}");
            None
        }
    }
}
