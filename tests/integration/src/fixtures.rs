//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests, including the
//! multipart registration form with a tiny valid PNG payload.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A 1x1 transparent PNG
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Registration form data
#[derive(Debug, Clone)]
pub struct RegisterFixture {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterFixture {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            full_name: format!("Test User {suffix}"),
            email: format!("test{suffix}@example.com"),
            username: format!("testuser{suffix}"),
            password: "TestPass123!".to_string(),
        }
    }

    /// Build the multipart registration form with an avatar file
    pub fn form(&self) -> Form {
        self.form_without_avatar().part(
            "avatar",
            Part::bytes(TINY_PNG)
                .file_name("avatar.png")
                .mime_str("image/png")
                .expect("static mime type"),
        )
    }

    /// Build the multipart form including a cover image
    pub fn form_with_cover(&self) -> Form {
        self.form().part(
            "coverImage",
            Part::bytes(TINY_PNG)
                .file_name("cover.png")
                .mime_str("image/png")
                .expect("static mime type"),
        )
    }

    /// Build the multipart form with text fields only
    pub fn form_without_avatar(&self) -> Form {
        Form::new()
            .text("fullName", self.full_name.clone())
            .text("email", self.email.clone())
            .text("username", self.username.clone())
            .text("password", self.password.clone())
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterFixture) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Password change request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Account details update request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub full_name: String,
    pub email: String,
}

/// Success envelope wrapper
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub data: T,
    pub message: String,
}

/// Sanitized user response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub watch_history: Vec<String>,
}

/// Auth response with tokens
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Token pair response from the refresh endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub code: String,
    pub message: String,
}
