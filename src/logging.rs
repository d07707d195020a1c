//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{NorthernError, Result};

/// Install the global subscriber, writing to stderr
///
/// stdout is left alone because the stdio transport owns it. Fails if a
/// global subscriber is already installed.
pub fn init_logging(json: bool) -> Result<()> {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    let installed = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    };
    installed.map_err(|e| NorthernError::Internal(format!("logging init failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_once() {
        // The only test in this binary that installs a global subscriber
        assert!(init_logging(false).is_ok());
        assert!(matches!(init_logging(true), Err(NorthernError::Internal(_))));
    }
}
