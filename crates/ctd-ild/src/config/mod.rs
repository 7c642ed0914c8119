use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the assistant.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("CTD_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("CTD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let format = match env::var("CTD_REPORT_FORMAT") {
            Ok(raw) => ReportFormat::parse(&raw)
                .ok_or(ConfigError::InvalidReportFormat { value: raw })?,
            Err(_) => ReportFormat::Text,
        };
        let author = env::var("CTD_REPORT_AUTHOR")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            report: ReportConfig { format, author },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "plain" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// How the final report is printed and signed.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub author: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidReportFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReportFormat { value } => write!(
                f,
                "CTD_REPORT_FORMAT must be `text` or `json`, got `{}`",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
