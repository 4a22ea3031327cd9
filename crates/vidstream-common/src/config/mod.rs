//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CookieSettings, CorsConfig, DatabaseConfig, Environment,
    MediaStoreConfig, ServerConfig, StorageConfig, TokenConfig,
};
