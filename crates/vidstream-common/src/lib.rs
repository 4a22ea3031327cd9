//! # vidstream-common
//!
//! Shared utilities including configuration, error handling, credential
//! primitives (password hashing, token issuing), and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password, Claims, TokenIssuer, TokenKind, TokenPair};
pub use config::{
    AppConfig, AppSettings, ConfigError, CookieSettings, CorsConfig, DatabaseConfig, Environment,
    MediaStoreConfig, ServerConfig, StorageConfig, TokenConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
