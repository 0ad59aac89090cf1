use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::huntflow::{AccountId, StatusId, DECLINED_STATUS_ID};

const DEFAULT_API_URL: &str = "https://dev-100-api.huntflow.ru/";
const DEFAULT_USER_AGENT: &str = "App/1.0 (incaseoffire@example.com)";

/// Distinguishes runtime behavior for different stages of the importer.
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

/// Top-level configuration for an import run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub huntflow: HuntflowConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let mut base_url =
            env::var("HUNTFLOW_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl { value: base_url });
        }
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let user_agent =
            env::var("HUNTFLOW_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let account_id = match env::var("HUNTFLOW_ACCOUNT_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map(AccountId)
                    .map_err(|_| ConfigError::InvalidAccountId)?,
            ),
            _ => None,
        };

        let declined_status_id = match env::var("HUNTFLOW_DECLINED_STATUS_ID") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(StatusId)
                .map_err(|_| ConfigError::InvalidDeclinedStatusId)?,
            _ => DECLINED_STATUS_ID,
        };

        let resume_root = env::var("HUNTFLOW_RESUME_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            huntflow: HuntflowConfig {
                base_url,
                user_agent,
                account_id,
                declined_status_id,
                resume_root,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }

    /// Combine the loaded settings with the bearer token supplied on the command line.
    pub fn api(&self, token: impl Into<String>) -> ApiConfig {
        ApiConfig {
            base_url: self.huntflow.base_url.clone(),
            token: token.into(),
            user_agent: self.huntflow.user_agent.clone(),
        }
    }
}

/// Settings describing the remote recruiting service and local résumé storage.
#[derive(Debug, Clone)]
pub struct HuntflowConfig {
    pub base_url: String,
    pub user_agent: String,
    pub account_id: Option<AccountId>,
    pub declined_status_id: StatusId,
    pub resume_root: PathBuf,
}

/// Immutable request settings shared by every call of a run.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
    pub user_agent: String,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidApiUrl { value: String },
    InvalidAccountId,
    InvalidDeclinedStatusId,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidApiUrl { value } => {
                write!(f, "HUNTFLOW_API_URL must be an http(s) URL, got '{}'", value)
            }
            ConfigError::InvalidAccountId => {
                write!(f, "HUNTFLOW_ACCOUNT_ID must be a numeric identifier")
            }
            ConfigError::InvalidDeclinedStatusId => {
                write!(f, "HUNTFLOW_DECLINED_STATUS_ID must be a numeric identifier")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
