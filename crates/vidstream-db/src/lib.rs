//! # vidstream-db
//!
//! PostgreSQL persistence layer: connection pool, row models, and the
//! `UserRepository` implementation.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_env, DatabaseConfig};
pub use repositories::PgUserRepository;
pub use sqlx::PgPool;
