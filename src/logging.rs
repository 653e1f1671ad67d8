//! Logging bootstrap for the command-line front end.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or the embedding application).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";
const LOG_JSON_ENV: &str = "TEDA_LOG_JSON";

/// Installs a stderr fmt subscriber filtered by `RUST_LOG` (default `warn`).
///
/// `verbose` raises the default to `debug` for this crate. Set
/// `TEDA_LOG_JSON=1` for JSON lines. Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,teda_board=debug"
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let result = if env_bool(LOG_JSON_ENV) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(err) = result {
        tracing::debug!(error = %err, "logging already initialized");
    }
}

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| parse_bool(&v))
        .unwrap_or(false)
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool(" TRUE "));
        assert!(parse_bool("on"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
