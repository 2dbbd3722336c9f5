use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("write failed: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("invalid account or password")]
    InvalidCredentials,

    #[error("invalid pagination: {0}")]
    InvalidPagination(String),
}

impl UserError {
    /// A write hit a unique key, i.e. the account is taken.
    pub fn is_conflict(&self) -> bool {
        match self {
            UserError::Storage(e) => e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()),
            _ => false,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            UserError::InvalidPagination(_) => StatusCode::BAD_REQUEST,
            _ if self.is_conflict() => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UserError> for (StatusCode, String) {
    fn from(err: UserError) -> Self {
        let status = err.status();
        if status.is_server_error() {
            tracing::error!(error = %err, "user operation failed");
            (status, "Internal server error".to_string())
        } else if status == StatusCode::CONFLICT {
            (status, "Account already exists".to_string())
        } else {
            (status, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_keeps_the_distinctions() {
        assert_eq!(UserError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            UserError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UserError::InvalidPagination("rows".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserError::Query(sqlx::Error::PoolClosed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            UserError::Hashing("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        use crate::user::memory::UniqueViolation;

        let err = UserError::Storage(sqlx::Error::Database(Box::new(UniqueViolation)));
        assert!(err.is_conflict());
        let (status, msg): (StatusCode, String) = err.into();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(msg, "Account already exists");
    }

    #[test]
    fn non_database_write_error_is_not_a_conflict() {
        assert!(!UserError::Storage(sqlx::Error::PoolTimedOut).is_conflict());
        assert!(!UserError::NotFound.is_conflict());
    }

    #[test]
    fn server_errors_do_not_leak_details() {
        let (status, msg): (StatusCode, String) =
            UserError::Query(sqlx::Error::Protocol("secret detail".into())).into();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!msg.contains("secret detail"));

        let (status, msg): (StatusCode, String) = UserError::NotFound.into();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "user not found");
    }

    #[test]
    fn source_is_preserved() {
        use std::error::Error as _;
        let err = UserError::Storage(sqlx::Error::PoolClosed);
        assert!(err.source().is_some());
        assert!(UserError::NotFound.source().is_none());
    }
}
