use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 20;

/// Distinguishes runtime behavior for different stages of the service.
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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub suggestions: SuggestionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            suggestions: SuggestionConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which suggester answers outfit requests, plus the knobs shared by all of them.
#[derive(Debug, Clone, Default)]
pub struct SuggestionConfig {
    pub provider: SuggestionProvider,
    /// Fixed seed for the rule-based suggester; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// JSON file replacing the built-in occasion rules.
    pub rules_path: Option<PathBuf>,
}

impl SuggestionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let seed = match env::var("WARDROBE_SUGGESTION_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed)?,
            ),
            _ => None,
        };

        let rules_path = env::var("WARDROBE_RULES_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let provider = env::var("WARDROBE_SUGGESTION_PROVIDER").unwrap_or_else(|_| "local".into());
        let provider = match provider.trim().to_ascii_lowercase().as_str() {
            "" | "local" | "rules" => SuggestionProvider::Local,
            "remote" | "ai" => SuggestionProvider::Remote(RemoteModelConfig::from_env()?),
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        Ok(Self {
            provider,
            seed,
            rules_path,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub enum SuggestionProvider {
    #[default]
    Local,
    Remote(RemoteModelConfig),
}

/// Connection settings for the remote text-generation service.
#[derive(Clone)]
pub struct RemoteModelConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl RemoteModelConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("WARDROBE_AI_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let endpoint =
            env::var("WARDROBE_AI_ENDPOINT").unwrap_or_else(|_| DEFAULT_MODEL_ENDPOINT.to_string());
        let model = env::var("WARDROBE_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = env::var("WARDROBE_AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_MODEL_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        Ok(Self {
            endpoint,
            model,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for RemoteModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteModelConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSeed,
    InvalidTimeout,
    MissingApiKey,
    UnknownProvider(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSeed => write!(f, "WARDROBE_SUGGESTION_SEED must be a valid u64"),
            ConfigError::InvalidTimeout => {
                write!(f, "WARDROBE_AI_TIMEOUT_SECS must be a whole number of seconds")
            }
            ConfigError::MissingApiKey => write!(
                f,
                "WARDROBE_AI_API_KEY is required when the remote suggestion provider is selected"
            ),
            ConfigError::UnknownProvider(value) => write!(
                f,
                "WARDROBE_SUGGESTION_PROVIDER '{}' is not one of: local, remote",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
