//! User entity - a registered account on the platform

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User account entity.
///
/// Secret material (password hash, refresh token) never lives on this
/// type. It stays in the persistence layer and is only reachable through
/// the narrow repository operations that need it, so any response built
/// from a `User` is sanitized by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    /// Unique handle, stored lowercase and trimmed.
    pub username: String,
    /// Unique address, stored lowercase and trimmed.
    pub email: String,
    pub full_name: String,
    /// URL of the avatar in the external media store. Always present.
    pub avatar: String,
    /// URL of the cover image, if one was ever uploaded.
    pub cover_image: Option<String>,
    /// Ordered weak references to watched videos.
    pub watch_history: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User, normalizing identity fields the way the store
    /// persists them: username/email lowercased and trimmed, full name
    /// trimmed.
    pub fn new(
        id: Uuid,
        username: &str,
        email: &str,
        full_name: &str,
        avatar: String,
        cover_image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: username.trim().to_lowercase(),
            email: email.trim().to_lowercase(),
            full_name: full_name.trim().to_string(),
            avatar,
            cover_image,
            watch_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this user has ever uploaded a cover image.
    #[inline]
    pub fn has_cover_image(&self) -> bool {
        self.cover_image.is_some()
    }
}
