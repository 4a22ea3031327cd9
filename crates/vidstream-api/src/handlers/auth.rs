//! Authentication handlers
//!
//! Endpoints for user registration, login, logout, and token refresh.

use std::path::PathBuf;

use axum::{
    extract::{Multipart, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use vidstream_service::{
    AccountService, AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    TokenPairResponse, UserResponse,
};

use crate::cookies::{apply_session_cookies, clear_session_cookies, REFRESH_TOKEN_COOKIE};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiEnvelope, ApiError, ApiResult};
use crate::state::AppState;
use crate::upload::save_upload_field;

/// Register a new user
///
/// POST /auth/register (multipart form: text fields + avatar/coverImage files)
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<ApiEnvelope<UserResponse>> {
    let mut full_name = String::new();
    let mut email = String::new();
    let mut username = String::new();
    let mut password = String::new();
    let mut avatar_path: Option<PathBuf> = None;
    let mut cover_image_path: Option<PathBuf> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
    {
        match field.name() {
            Some("fullName") => full_name = read_text_field(field).await?,
            Some("email") => email = read_text_field(field).await?,
            Some("username") => username = read_text_field(field).await?,
            Some("password") => password = read_text_field(field).await?,
            Some("avatar") => {
                avatar_path = Some(save_upload_field(field, &state.config().storage).await?);
            }
            Some("coverImage") => {
                cover_image_path = Some(save_upload_field(field, &state.config().storage).await?);
            }
            _ => {}
        }
    }

    let request = RegisterRequest {
        full_name,
        email,
        username,
        password,
    };
    request.validate()?;

    let service = AccountService::new(state.service_context());
    let user = service
        .register(request, avatar_path.as_deref(), cover_image_path.as_deref())
        .await?;

    Ok(ApiEnvelope::created(user, "User registered successfully"))
}

/// Login with username or email plus password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, ApiEnvelope<AuthResponse>)> {
    let service = AccountService::new(state.service_context());
    let response = service.login(request).await?;

    let jar = apply_session_cookies(
        jar,
        &response.access_token,
        &response.refresh_token,
        &state.config().cookies,
    );

    Ok((jar, ApiEnvelope::ok(response, "User logged in successfully")))
}

/// Logout the authenticated user
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> ApiResult<(CookieJar, ApiEnvelope<serde_json::Value>)> {
    let service = AccountService::new(state.service_context());
    service.logout(auth.user_id).await?;

    let jar = clear_session_cookies(jar);

    Ok((jar, ApiEnvelope::ok(serde_json::json!({}), "User logged out")))
}

/// Refresh the access token
///
/// POST /auth/refresh (token from the refreshToken cookie or the body)
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshTokenRequest>>,
) -> ApiResult<(CookieJar, ApiEnvelope<TokenPairResponse>)> {
    let incoming = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| body.and_then(|b| b.0.refresh_token));

    let service = AccountService::new(state.service_context());
    let response = service.refresh_tokens(incoming).await?;

    let jar = apply_session_cookies(
        jar,
        &response.access_token,
        &response.refresh_token,
        &state.config().cookies,
    );

    Ok((jar, ApiEnvelope::ok(response, "Access token refreshed")))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))
}
