//! Service context - dependency container for services
//!
//! Holds the repository, the media storage, and the token issuer. All
//! three are injected at startup; services never construct their own
//! collaborators or read configuration.

use std::sync::Arc;

use vidstream_common::TokenIssuer;
use vidstream_core::traits::{MediaStorage, UserRepository};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    media_storage: Arc<dyn MediaStorage>,
    token_issuer: Arc<TokenIssuer>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        media_storage: Arc<dyn MediaStorage>,
        token_issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            user_repo,
            media_storage,
            token_issuer,
        }
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the media storage
    pub fn media_storage(&self) -> &dyn MediaStorage {
        self.media_storage.as_ref()
    }

    /// Get the token issuer
    pub fn token_issuer(&self) -> &TokenIssuer {
        self.token_issuer.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("user_repo", &"dyn UserRepository")
            .field("media_storage", &"dyn MediaStorage")
            .field("token_issuer", &self.token_issuer)
            .finish()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    media_storage: Option<Arc<dyn MediaStorage>>,
    token_issuer: Option<Arc<TokenIssuer>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            media_storage: None,
            token_issuer: None,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn media_storage(mut self, storage: Arc<dyn MediaStorage>) -> Self {
        self.media_storage = Some(storage);
        self
    }

    pub fn token_issuer(mut self, issuer: Arc<TokenIssuer>) -> Self {
        self.token_issuer = Some(issuer);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.media_storage
                .ok_or_else(|| super::error::ServiceError::validation("media_storage is required"))?,
            self.token_issuer
                .ok_or_else(|| super::error::ServiceError::validation("token_issuer is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
