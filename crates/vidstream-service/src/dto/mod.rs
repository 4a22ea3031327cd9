//! Data transfer objects

mod mappers;
mod requests;
mod responses;

pub use requests::{
    ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UpdateAccountRequest,
};
pub use responses::{AuthResponse, TokenPairResponse, UserResponse};
