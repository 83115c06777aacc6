//! The identity-store contract the access-control middleware hydrates
//! through.
//!
//! The middleware never talks to a repository type directly; it sees this
//! trait, which keeps the hydration step swappable for an in-memory store
//! under test.

use async_trait::async_trait;

use incidenthub_core::result::AppResult;
use incidenthub_database::repositories::user::UserRepository;
use incidenthub_entity::user::User;

/// Query-and-update surface over stored identities.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Resolve an identity by its numeric ID.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Resolve an identity by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Replace the password hash, refreshing the change timestamp.
    async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<()>;
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_username(self, username).await
    }

    async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<()> {
        UserRepository::update_password(self, user_id, password_hash).await
    }
}
