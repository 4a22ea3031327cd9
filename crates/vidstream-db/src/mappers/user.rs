//! User row to entity mapping
//!
//! Dropping the secret columns here is what keeps the domain entity (and
//! everything serialized from it) sanitized.

use vidstream_core::entities::User;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            avatar: model.avatar,
            cover_image: model.cover_image,
            watch_history: model.watch_history,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
