use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser},
        jwt::JwtKeys,
    },
    state::AppState,
    user::UserError,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.account = payload.account.trim().to_string();

    if payload.account.is_empty() || payload.password.is_empty() {
        warn!("empty account or password");
        return Err((
            StatusCode::BAD_REQUEST,
            "Account and password are required".into(),
        ));
    }

    let user_id = match state
        .users
        .authenticate(&payload.account, &payload.password)
        .await
    {
        Ok(id) => id,
        Err(UserError::InvalidCredentials) => {
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user_id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    })?;

    info!(user_id, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        user: PublicUser {
            id: user_id,
            account: payload.account,
        },
    }))
}
