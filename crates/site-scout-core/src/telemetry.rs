use crate::config::{LogFormat, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    /// The configured level could not be parsed and no usable `RUST_LOG` was set.
    InvalidLevel { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidLevel { directive, .. } => {
                write!(f, "SITE_SCOUT_LOG_LEVEL '{directive}' is not a valid filter")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a log subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidLevel { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// An operator directive (usually `RUST_LOG`) takes precedence; an unparsable one
/// is ignored in favour of the configured level.
pub fn build_filter(
    override_directive: Option<&str>,
    level: &str,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = override_directive
        .filter(|directive| !directive.trim().is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
    {
        return Ok(filter);
    }

    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidLevel {
        directive: level.to_string(),
        source,
    })
}

/// Installs the global subscriber. Logs always go to stderr so the scoring report
/// on stdout stays machine-readable in both formats.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), &config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    let installed = match config.format {
        LogFormat::Compact => builder.with_target(false).compact().try_init(),
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .try_init(),
    };
    installed.map_err(TelemetryError::AlreadyInstalled)
}
