// Session authentication and authorization error types

use axum::response::{IntoResponse, Response};
use std::fmt;

use crate::error::ApiError;

/// Authentication and authorization error types
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    // Authentication errors
    MissingToken,
    InvalidToken,
    ExpiredToken,
    TokenGenerationError(String),

    // Authorization errors
    /// Session identity does not own the requested resource
    OwnerMismatch {
        identity: String,
        requested: Option<String>,
    },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Missing session token"),
            AuthError::InvalidToken => write!(f, "Invalid session token"),
            AuthError::ExpiredToken => write!(f, "Session token has expired"),
            AuthError::TokenGenerationError(msg) => write!(f, "Token generation error: {}", msg),
            AuthError::OwnerMismatch { identity, requested } => write!(
                f,
                "Identity '{}' may not access resources of '{}'",
                identity,
                requested.as_deref().unwrap_or("<none>")
            ),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::ExpiredToken => {
                ApiError::Unauthorized(format!("Unauthorized Access: {}", error))
            }
            AuthError::OwnerMismatch { .. } => {
                tracing::warn!("{}", error);
                ApiError::Forbidden("Forbidden Access".to_string())
            }
            AuthError::TokenGenerationError(msg) => {
                ApiError::InternalError(format!("Token generation error: {}", msg))
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_session_failures_are_unauthorized() {
        for error in [AuthError::MissingToken, AuthError::InvalidToken, AuthError::ExpiredToken] {
            assert_eq!(ApiError::from(error).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_owner_mismatch_is_forbidden() {
        let error = AuthError::OwnerMismatch {
            identity: "a@x.com".to_string(),
            requested: Some("b@x.com".to_string()),
        };
        assert_eq!(error.clone().into_response().status(), StatusCode::FORBIDDEN);
        assert!(error.to_string().contains("b@x.com"));
    }

    #[test]
    fn test_generation_failure_is_internal() {
        let error = AuthError::TokenGenerationError("bad key".to_string());
        assert_eq!(ApiError::from(error).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
