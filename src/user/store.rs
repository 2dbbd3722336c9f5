use async_trait::async_trait;

use crate::user::repo_types::{Credentials, User};

/// One method per statement against the `user` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// `account`, `name` and `role` of an active user.
    async fn find_active(&self, id: i64) -> Result<Option<User>, sqlx::Error>;
    /// Users ordered by id, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error>;
    async fn count(&self) -> Result<i64, sqlx::Error>;
    /// Insert a row whose password is already hashed; returns the new id.
    /// `user.state` is ignored, new rows are always active.
    async fn insert(&self, user: &User) -> Result<i64, sqlx::Error>;
    async fn find_credentials(&self, account: &str) -> Result<Option<Credentials>, sqlx::Error>;
    /// Returns the number of rows updated.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<u64, sqlx::Error>;
}
