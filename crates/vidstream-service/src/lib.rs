//! # vidstream-service
//!
//! Application layer: request/response DTOs and the account service
//! orchestrating the credential/session lifecycle and profile updates.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    TokenPairResponse, UpdateAccountRequest, UserResponse,
};
pub use services::{
    AccountService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
