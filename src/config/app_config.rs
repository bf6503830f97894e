use serde::Deserialize;

use crate::domain::parameters::DEFAULT_MAX_TEMPERATURE;
use crate::infrastructure::llm::DEFAULT_MISTRAL_BASE_URL;
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::rate_limit::RateLimitRule;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub metrics: MetricsConfig,
    pub experiments: ExperimentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Reported by the health endpoint
    pub environment: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Generation provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset
    pub api_key_env: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Upper bound for sampled temperatures
    pub max_temperature: f64,
}

impl ProviderConfig {
    /// Configured key, or the one found in `api_key_env`
    pub fn resolved_api_key(&self) -> Option<String> {
        let non_blank = |key: &str| {
            let key = key.trim();
            (!key.is_empty()).then(|| key.to_string())
        };

        self.api_key
            .as_deref()
            .and_then(non_blank)
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .as_deref()
                    .and_then(non_blank)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl StorageConfig {
    pub fn resolved_database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }
}

/// Per-client request budgets
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Take the client address from `X-Forwarded-For` (behind one proxy)
    pub trust_proxy: bool,
    pub general: RateLimitRule,
    pub experiments: RateLimitRule,
    pub history: RateLimitRule,
}

impl RateLimitConfig {
    /// Longest window across all buckets
    pub fn longest_window_secs(&self) -> u64 {
        [&self.general, &self.experiments, &self.history]
            .iter()
            .map(|rule| rule.window_secs)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExperimentsConfig {
    pub history_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            environment: "development".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "MISTRAL_API_KEY".to_string(),
            model: "mistral-small-latest".to_string(),
            base_url: DEFAULT_MISTRAL_BASE_URL.to_string(),
            timeout_secs: 60,
            max_temperature: DEFAULT_MAX_TEMPERATURE,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: None,
            max_connections: 5,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trust_proxy: false,
            general: RateLimitRule::new(80, 900),
            experiments: RateLimitRule::new(15, 300),
            history: RateLimitRule::new(40, 300),
        }
    }
}

impl Default for ExperimentsConfig {
    fn default() -> Self {
        Self { history_limit: 20 }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
