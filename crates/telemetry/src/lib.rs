//! Logging and tracing bootstrap.

use tracing_subscriber::EnvFilter;

use bookstore_kernel::settings::{LogFormat, TelemetrySettings};

/// Initialize the tracing pipeline according to the configured format.
///
/// `RUST_LOG` overrides the default `info` filter. Returns an error if a
/// global subscriber is already installed.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match settings.log_format {
        LogFormat::Pretty => builder
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to init tracing subscriber: {err}"))?,
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to init tracing subscriber: {err}"))?,
    }

    tracing::debug!(format = ?settings.log_format, "telemetry initialized");
    Ok(())
}
