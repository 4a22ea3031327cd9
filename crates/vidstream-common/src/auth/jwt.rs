//! Token issuing and verification
//!
//! Signs and verifies the access/refresh credential pair using the
//! `jsonwebtoken` crate. Each kind has its own secret and expiry,
//! supplied through `TokenConfig` at startup. The issuer is stateless
//! aside from reading the wall clock.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vidstream_core::entities::User;

use crate::config::TokenConfig;
use crate::error::AppError;

/// Token kind enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
///
/// Access tokens carry the profile fields; refresh tokens carry only the
/// subject, so a leaked refresh token exposes less.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token kind (access or refresh)
    pub kind: TokenKind,
}

impl Claims {
    /// Check if this is an access token
    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.kind == TokenKind::Access
    }

    /// Check if this is a refresh token
    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.kind == TokenKind::Refresh
    }
}

/// Token pair containing access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Issues and verifies the access/refresh credential pair.
#[derive(Clone)]
pub struct TokenIssuer {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl TokenIssuer {
    /// Create a new issuer from the token configuration
    #[must_use]
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            access_encoding_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
        }
    }

    /// Issue a fresh access/refresh pair for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.sign_access(user)?;
        let refresh_token = self.sign_refresh(user.id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Sign an access token carrying the user's identity claims
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign_access(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: Some(user.email.clone()),
            username: Some(user.username.clone()),
            full_name: Some(user.full_name.clone()),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            kind: TokenKind::Access,
        };

        encode(&Header::default(), &claims, &self.access_encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode access token")))
    }

    /// Sign a refresh token carrying only the user id
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign_refresh(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: None,
            username: None,
            full_name: None,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.refresh_token_expiry)).timestamp(),
            kind: TokenKind::Refresh,
        };

        encode(&Header::default(), &claims, &self.refresh_encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode refresh token")))
    }

    /// Decode and validate an access token
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not an access token
    pub fn decode_access(&self, token: &str) -> Result<Claims, AppError> {
        let claims = Self::decode_with(token, &self.access_decoding_key)?;

        if !claims.is_access_token() {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// Decode and validate a refresh token
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not a refresh token
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, AppError> {
        let claims = Self::decode_with(token, &self.refresh_decoding_key)?;

        if !claims.is_refresh_token() {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    fn decode_with(token: &str, key: &DecodingKey) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }

    /// Get the access token expiry in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Get the refresh token expiry in seconds
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
