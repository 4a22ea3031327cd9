//! Comment entity - reference shape only
//!
//! Comments hold weak references to a video and its author; they do not
//! own either lifecycle. The account subsystem never mutates comments,
//! this entity exists to show the reference shape other modules expect
//! from `User`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A comment left on a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    /// Weak reference to the commented video.
    pub video_id: Uuid,
    /// Weak reference to the authoring user.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: Uuid, content: String, video_id: Uuid, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            content,
            video_id,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}
