//! Account service
//!
//! Orchestrates registration, login, logout, token refresh, password
//! change, and profile/media updates. Each operation is a strictly
//! sequential chain of store/storage calls; every failure is raised at
//! the point of detection and no operation partially commits.

use std::path::Path;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use vidstream_common::{hash_password, verify_password, AppError, TokenPair};
use vidstream_core::entities::User;

use crate::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, TokenPairResponse,
    UpdateAccountRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user.
    ///
    /// The avatar upload is mandatory and fatal on failure; the cover
    /// image is best effort and silently absent when its upload fails.
    #[instrument(skip_all, fields(username = %request.username, email = %request.email))]
    pub async fn register(
        &self,
        request: RegisterRequest,
        avatar_file: Option<&Path>,
        cover_image_file: Option<&Path>,
    ) -> ServiceResult<UserResponse> {
        let full_name = request.full_name.trim();
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_lowercase();

        if full_name.is_empty()
            || email.is_empty()
            || username.is_empty()
            || request.password.trim().is_empty()
        {
            return Err(ServiceError::validation("All fields are required"));
        }

        // Fast-path duplicate check; the store's unique constraints close
        // the race with a concurrent create.
        if self
            .ctx
            .user_repo()
            .find_by_username_or_email(Some(&username), Some(&email))
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict(
                "User with email or username already exists",
            ));
        }

        let avatar_path =
            avatar_file.ok_or_else(|| ServiceError::validation("Avatar file is required"))?;

        let avatar = self
            .ctx
            .media_storage()
            .upload(avatar_path)
            .await
            .ok_or_else(|| ServiceError::validation("Avatar file is required"))?;

        let cover_image = match cover_image_file {
            Some(path) => self
                .ctx
                .media_storage()
                .upload(path)
                .await
                .map(|media| media.url),
            None => None,
        };

        let password_hash = hash_password(&request.password).map_err(ServiceError::from)?;

        let user = User::new(
            Uuid::new_v4(),
            &username,
            &email,
            full_name,
            avatar.url,
            cover_image,
        );
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        // Read the row back without secret fields; a miss here means the
        // write cannot be confirmed.
        let created = self
            .ctx
            .user_repo()
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| ServiceError::internal("Registration could not be confirmed"))?;

        Ok(UserResponse::from(&created))
    }

    /// Login with username or email plus password
    #[instrument(skip_all)]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let username = normalize_identity(request.username);
        let email = normalize_identity(request.email);

        if username.is_none() && email.is_none() {
            return Err(ServiceError::validation("Username or email is required"));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_username_or_email(username.as_deref(), email.as_deref())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::not_found(
                    "User",
                    username.or(email).unwrap_or_default(),
                )
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)?;
        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let pair = self.issue_and_store_tokens(&user).await?;

        // Re-read after the refresh token persist so updated_at reflects
        // this login.
        let user = self.fetch_user(user.id).await?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse::new(pair, UserResponse::from(&user)))
    }

    /// Logout: clear the stored refresh token
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Uuid) -> ServiceResult<()> {
        self.ctx.user_repo().set_refresh_token(user_id, None).await?;

        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Exchange a refresh token for a fresh access/refresh pair.
    ///
    /// The incoming token must match the currently stored one exactly;
    /// anything else (including a stale token that was already rotated
    /// out) is rejected, which enforces single-use rotation.
    #[instrument(skip_all)]
    pub async fn refresh_tokens(
        &self,
        incoming_refresh_token: Option<String>,
    ) -> ServiceResult<TokenPairResponse> {
        let incoming = incoming_refresh_token
            .filter(|token| !token.is_empty())
            .ok_or(ServiceError::App(AppError::MissingAuth))?;

        let claims = self.ctx.token_issuer().decode_refresh(&incoming)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "Refresh failed: unknown user");
                ServiceError::App(AppError::InvalidToken)
            })?;

        let stored = self.ctx.user_repo().get_refresh_token(user.id).await?;
        if stored.as_deref() != Some(incoming.as_str()) {
            warn!(user_id = %user.id, "Refresh failed: token expired or already used");
            return Err(ServiceError::unauthorized(
                "Refresh token is expired or already used",
            ));
        }

        let pair = self.issue_and_store_tokens(&user).await?;

        info!(user_id = %user.id, "Tokens refreshed");

        Ok(TokenPairResponse::from(pair))
    }

    /// Change the current user's password
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn change_password(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let is_valid = verify_password(&request.old_password, &password_hash)?;
        if !is_valid {
            warn!(user_id = %user_id, "Password change failed: invalid old password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let new_hash = hash_password(&request.new_password)?;
        self.ctx.user_repo().update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Get the current authenticated user
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Uuid) -> ServiceResult<UserResponse> {
        let user = self.fetch_user(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Update full name and email
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn update_account_details(
        &self,
        user_id: Uuid,
        request: UpdateAccountRequest,
    ) -> ServiceResult<UserResponse> {
        let full_name = request.full_name.trim();
        let email = request.email.trim().to_lowercase();

        if full_name.is_empty() || email.is_empty() {
            return Err(ServiceError::validation("All fields are required"));
        }

        self.ctx
            .user_repo()
            .update_details(user_id, full_name, &email)
            .await?;

        let user = self.fetch_user(user_id).await?;

        info!(user_id = %user_id, "Account details updated");
        Ok(UserResponse::from(&user))
    }

    /// Replace the avatar image
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn update_avatar(
        &self,
        user_id: Uuid,
        avatar_file: Option<&Path>,
    ) -> ServiceResult<UserResponse> {
        let path =
            avatar_file.ok_or_else(|| ServiceError::validation("Avatar file is required"))?;

        let media = self
            .ctx
            .media_storage()
            .upload(path)
            .await
            .ok_or_else(|| ServiceError::validation("Avatar upload failed"))?;

        // The previous avatar stays in the external store; there is no
        // delete API in use.
        self.ctx.user_repo().set_avatar(user_id, &media.url).await?;

        let user = self.fetch_user(user_id).await?;

        info!(user_id = %user_id, "Avatar updated");
        Ok(UserResponse::from(&user))
    }

    /// Replace the cover image
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn update_cover_image(
        &self,
        user_id: Uuid,
        cover_image_file: Option<&Path>,
    ) -> ServiceResult<UserResponse> {
        let path = cover_image_file
            .ok_or_else(|| ServiceError::validation("Cover image file is required"))?;

        let media = self
            .ctx
            .media_storage()
            .upload(path)
            .await
            .ok_or_else(|| ServiceError::validation("Cover image upload failed"))?;

        self.ctx
            .user_repo()
            .set_cover_image(user_id, &media.url)
            .await?;

        let user = self.fetch_user(user_id).await?;

        info!(user_id = %user_id, "Cover image updated");
        Ok(UserResponse::from(&user))
    }

    /// Issue a fresh token pair and persist the refresh token on the user
    /// record, overwriting any prior value (single active refresh token).
    async fn issue_and_store_tokens(&self, user: &User) -> ServiceResult<TokenPair> {
        let pair = self
            .ctx
            .token_issuer()
            .issue_pair(user)
            .map_err(|_| ServiceError::internal("Something went wrong while generating tokens"))?;

        self.ctx
            .user_repo()
            .set_refresh_token(user.id, Some(&pair.refresh_token))
            .await?;

        Ok(pair)
    }

    async fn fetch_user(&self, user_id: Uuid) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

/// Trim, lowercase, and drop empty identity inputs.
fn normalize_identity(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}
