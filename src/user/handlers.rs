use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    state::AppState,
    user::{
        dto::{
            ChangePasswordRequest, CreateUserRequest, CreatedUserResponse, MeResponse, PageQuery,
            UserListResponse,
        },
        repo_types::{Pagination, User, STATE_ACTIVE},
        UserError,
    },
};

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/password", put(change_password))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, (StatusCode, String)> {
    let user = state.users.fetch_by_id(user_id).await?;
    Ok(Json(MeResponse {
        id: user.id,
        account: user.account,
        name: user.name,
        role: user.role,
    }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(q): Query<PageQuery>,
) -> Result<Json<UserListResponse>, (StatusCode, String)> {
    let (list, pagination) = state
        .users
        .list_page(Pagination::new(q.page, q.rows))
        .await?;
    Ok(Json(UserListResponse { list, pagination }))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(creator): AuthUser,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedUserResponse>), (StatusCode, String)> {
    payload.account = payload.account.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if payload.account.is_empty() {
        warn!("empty account");
        return Err((StatusCode::BAD_REQUEST, "Account is required".into()));
    }
    if !payload.email.is_empty() && !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }

    let now = OffsetDateTime::now_utc().unix_timestamp();
    let mut user = User {
        account: payload.account,
        password: payload.password,
        name: payload.name,
        email: payload.email,
        role: payload.role,
        state: STATE_ACTIVE,
        create_time: now,
        update_time: now,
        ..Default::default()
    };
    let id = state.users.create(&mut user).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/users/{id}").parse() {
        headers.insert(header::LOCATION, location);
    }

    info!(user_id = id, creator, account = %user.account, "user registered");
    Ok((StatusCode::CREATED, headers, Json(CreatedUserResponse { id })))
}

/// The caller must prove the current password before it is replaced.
#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if payload.new_password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }

    let user = state.users.fetch_by_id(user_id).await?;
    match state
        .users
        .authenticate(&user.account, &payload.old_password)
        .await
    {
        Ok(id) if id == user_id => {}
        Ok(_) | Err(UserError::InvalidCredentials) => {
            return Err((StatusCode::FORBIDDEN, "Old password is incorrect".into()));
        }
        Err(e) => return Err(e.into()),
    }

    state
        .users
        .change_password(user_id, &payload.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
