use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::siting::EngineConfig;

/// Distinguishes runtime behavior for different stages of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("SITE_SCOUT_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("SITE_SCOUT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("SITE_SCOUT_LOG_FORMAT") {
            Ok(raw) if !raw.trim().is_empty() => LogFormat::parse(&raw)?,
            _ => LogFormat::default_for(environment),
        };

        let engine_config_path = env::var("SITE_SCOUT_ENGINE_CONFIG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let cycle_year = match env::var("SITE_SCOUT_CYCLE_YEAR") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| ConfigError::InvalidCycleYear(raw.clone()))?,
            ),
            _ => None,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            scoring: ScoringSettings {
                engine_config_path,
                cycle_year,
            },
        })
    }
}

/// Where rule constants come from and which allocation cycle to score against.
#[derive(Debug, Clone, Default)]
pub struct ScoringSettings {
    pub engine_config_path: Option<PathBuf>,
    pub cycle_year: Option<i32>,
}

impl ScoringSettings {
    /// Jurisdiction overrides when a path is configured, otherwise the built-in defaults.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let config = match &self.engine_config_path {
            Some(path) => EngineConfig::from_path(path)?,
            None => EngineConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Shape of each log line on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// One JSON object per event, for log shippers.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }

    fn default_for(environment: AppEnvironment) -> Self {
        match environment {
            AppEnvironment::Production => Self::Json,
            AppEnvironment::Development | AppEnvironment::Test => Self::Compact,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCycleYear(String),
    InvalidLogFormat(String),
    CycleYearOutOfRange(i32),
    InvalidSetting { field: &'static str, reason: String },
    EngineConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },
    EngineConfigParse { source: serde_json::Error },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCycleYear(raw) => {
                write!(f, "SITE_SCOUT_CYCLE_YEAR must be a year, got '{raw}'")
            }
            ConfigError::InvalidLogFormat(raw) => {
                write!(f, "SITE_SCOUT_LOG_FORMAT must be 'compact' or 'json', got '{raw}'")
            }
            ConfigError::CycleYearOutOfRange(year) => {
                write!(f, "cycle year {year} is outside the supported range")
            }
            ConfigError::InvalidSetting { field, reason } => {
                write!(f, "invalid engine setting {field}: {reason}")
            }
            ConfigError::EngineConfigIo { path, .. } => {
                write!(f, "unable to read engine config {}", path.display())
            }
            ConfigError::EngineConfigParse { source } => {
                write!(f, "engine config is not valid JSON: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::EngineConfigIo { source, .. } => Some(source),
            ConfigError::EngineConfigParse { source } => Some(source),
            ConfigError::InvalidCycleYear(_)
            | ConfigError::InvalidLogFormat(_)
            | ConfigError::CycleYearOutOfRange(_)
            | ConfigError::InvalidSetting { .. } => None,
        }
    }
}
