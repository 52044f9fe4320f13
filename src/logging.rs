//! Logging setup
//!
//! Two `tracing` layers: compact stderr output filtered by `FINANZ_LOG` (or
//! the `-v` count), and a debug log appended to `finanz.log` in the data
//! directory.

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::paths::FinanzPaths;
use crate::error::{FinanzError, FinanzResult};

/// Environment variable holding an `EnvFilter` directive for stderr
pub const LOG_ENV: &str = "FINANZ_LOG";

/// Directive for the file layer
const FILE_DIRECTIVE: &str = "finanz=debug";

/// Stderr level for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn stderr_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Install the global subscriber. A log file that cannot be opened only
/// disables the file layer.
pub fn init(paths: &FinanzPaths, verbosity: u8) -> FinanzResult<()> {
    let stderr_log = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter(verbosity));

    let debug_log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .ok()
        .map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(EnvFilter::new(FILE_DIRECTIVE))
        });

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .try_init()
        .map_err(|e| FinanzError::Config(format!("Failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(9), "debug");
    }
}
