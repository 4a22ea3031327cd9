//! # vidstream-api
//!
//! REST API server exposing the account subsystem over HTTP.

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod upload;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
