//! Tracing subscriber bootstrap shared by the server binary and the CLI.

use anyhow::anyhow;
use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to the configured directive.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => directive_filter(&settings.log_filter),
    }
}

/// Parse a filter directive such as `info,tower_http=debug`.
pub fn directive_filter(directive: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| anyhow!("invalid log filter '{}': {}", directive, e))
}

/// Install the global tracing subscriber.
///
/// Calling this more than once is harmless: later calls keep the subscriber
/// that is already installed.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(
            target: "bookshelf-telemetry",
            format = ?settings.log_format,
            "telemetry initialized"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_reported() {
        let err = directive_filter("bookshelf=verbose").unwrap_err();
        assert!(err.to_string().contains("invalid log filter 'bookshelf=verbose'"));
    }

    #[test]
    fn configured_directive_is_parsed() {
        assert!(directive_filter("info,tower_http=debug").is_ok());
    }

    #[test]
    fn init_twice_is_harmless() {
        let settings = TelemetrySettings::default();
        init(&settings).unwrap();
        init(&settings).unwrap();
    }
}
