//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, CorsConfig, ExperimentsConfig, LogFormat, LoggingConfig, ProviderConfig,
    RateLimitConfig, ServerConfig, StorageBackend, StorageConfig,
};
