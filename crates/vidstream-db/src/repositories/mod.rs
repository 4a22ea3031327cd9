//! Repository implementations

mod error;
mod user;

pub use user::PgUserRepository;
