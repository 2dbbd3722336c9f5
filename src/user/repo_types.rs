use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// `state` value of an active account.
pub const STATE_ACTIVE: i16 = 1;

/// User record in the database.
///
/// Queries project only the columns they need; the rest stay at their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[sqlx(default)]
    pub id: i64,
    pub account: String,
    #[serde(skip_serializing)]
    #[sqlx(default)]
    pub password: String, // plaintext on the way in, Argon2 PHC string once stored
    pub name: String,
    #[sqlx(default)]
    pub email: String,
    pub role: String,
    #[sqlx(default)]
    pub state: i16,
    #[sqlx(default)]
    pub create_time: i64, // unix seconds, set by the caller
    #[sqlx(default)]
    pub update_time: i64,
}

/// Many users, newest first when coming from a page query.
pub type Users = Vec<User>;

/// Id and stored hash of an account.
#[derive(Debug, Clone, FromRow)]
pub struct Credentials {
    pub id: i64,
    pub password: String,
}

/// 1-based page request; `total` is filled by the page query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub rows: i64,
    #[serde(default)]
    pub total: i64,
}

impl Pagination {
    pub fn new(page: i64, rows: i64) -> Self {
        Self {
            page,
            rows,
            total: 0,
        }
    }

    /// Rows to skip, or `None` when the product does not fit in an `i64`.
    pub fn offset(&self) -> Option<i64> {
        self.page.checked_sub(1)?.checked_mul(self.rows)
    }
}
