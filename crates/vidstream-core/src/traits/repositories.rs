//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Mutations are deliberately narrow: each
//! operation touches exactly the fields it names, so there is no generic
//! "save" with validation escape hatches. Only `create` and
//! `update_password` ever carry a password hash.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::User;
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find a user matching the given username OR email.
    ///
    /// A `None` argument does not participate in the match. Callers must
    /// pass at least one of the two.
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Option<User>>;

    /// Create a new user with the given password hash.
    ///
    /// Uniqueness of username and email is enforced by the store; a
    /// violation surfaces as `DomainError::UserAlreadyExists`.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Replace the password hash
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()>;

    /// Get the currently stored refresh token, if any
    async fn get_refresh_token(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Store the given refresh token, overwriting any prior value.
    /// `None` clears the token (logout).
    async fn set_refresh_token(&self, id: Uuid, refresh_token: Option<&str>) -> RepoResult<()>;

    /// Update full name and email
    async fn update_details(&self, id: Uuid, full_name: &str, email: &str) -> RepoResult<()>;

    /// Replace the avatar URL
    async fn set_avatar(&self, id: Uuid, url: &str) -> RepoResult<()>;

    /// Replace the cover image URL
    async fn set_cover_image(&self, id: Uuid, url: &str) -> RepoResult<()>;
}
