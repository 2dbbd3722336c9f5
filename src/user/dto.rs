use serde::{Deserialize, Serialize};

use crate::user::repo_types::{Pagination, User};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub account: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub account: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_rows")]
    pub rows: i64,
}
fn default_page() -> i64 {
    1
}
fn default_rows() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub list: Vec<User>,
    pub pagination: Pagination,
}
