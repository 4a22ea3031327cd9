//! User handlers
//!
//! Endpoints for the authenticated user's profile: current user lookup,
//! password change, account details, and profile media updates.

use std::path::PathBuf;

use axum::extract::{Multipart, State};

use vidstream_service::{AccountService, ChangePasswordRequest, UpdateAccountRequest, UserResponse};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiEnvelope, ApiError, ApiResult};
use crate::state::AppState;
use crate::upload::save_upload_field;

/// Get current user
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiEnvelope<UserResponse>> {
    let service = AccountService::new(state.service_context());
    let user = service.get_current_user(auth.user_id).await?;

    Ok(ApiEnvelope::ok(user, "Current user fetched successfully"))
}

/// Change the current user's password
///
/// POST /users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<ApiEnvelope<serde_json::Value>> {
    let service = AccountService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;

    Ok(ApiEnvelope::ok(
        serde_json::json!({}),
        "Password changed successfully",
    ))
}

/// Update full name and email
///
/// PATCH /users/me
pub async fn update_account_details(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateAccountRequest>,
) -> ApiResult<ApiEnvelope<UserResponse>> {
    let service = AccountService::new(state.service_context());
    let user = service.update_account_details(auth.user_id, request).await?;

    Ok(ApiEnvelope::ok(user, "Account details updated successfully"))
}

/// Replace the avatar image
///
/// PATCH /users/me/avatar (multipart with an "avatar" file field)
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<ApiEnvelope<UserResponse>> {
    let file = read_file_field(multipart, "avatar", &state).await?;

    let service = AccountService::new(state.service_context());
    let user = service.update_avatar(auth.user_id, file.as_deref()).await?;

    Ok(ApiEnvelope::ok(user, "Avatar updated successfully"))
}

/// Replace the cover image
///
/// PATCH /users/me/cover-image (multipart with a "coverImage" file field)
pub async fn update_cover_image(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<ApiEnvelope<UserResponse>> {
    let file = read_file_field(multipart, "coverImage", &state).await?;

    let service = AccountService::new(state.service_context());
    let user = service
        .update_cover_image(auth.user_id, file.as_deref())
        .await?;

    Ok(ApiEnvelope::ok(user, "Cover image updated successfully"))
}

/// Pull the single expected file field out of a multipart body.
async fn read_file_field(
    mut multipart: Multipart,
    name: &str,
    state: &AppState,
) -> ApiResult<Option<PathBuf>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
    {
        if field.name() == Some(name) {
            return Ok(Some(
                save_upload_field(field, &state.config().storage).await?,
            ));
        }
    }

    Ok(None)
}
