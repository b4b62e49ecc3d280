// HTTP handlers for session endpoints

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use validator::Validate;

use crate::auth::models::{IdentityRequest, SessionResponse};
use crate::error::ApiError;
use crate::AppState;

/// Issue a session token and set it as the `token` cookie
/// POST /jwt
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Session cookie set", body = SessionResponse),
        (status = 400, description = "Invalid identity")
    ),
    tag = "auth"
)]
pub async fn issue_session_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<IdentityRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    identity.validate()?;

    let token = state.tokens.issue(&identity.email)?;
    tracing::info!("Issued session for {}", identity.email);

    Ok((state.session_cookie.attach(jar, token), Json(SessionResponse::ok())))
}

/// Clear the session cookie
/// POST /logout
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = SessionResponse)
    ),
    tag = "auth"
)]
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    (state.session_cookie.revoke(jar), Json(SessionResponse::ok()))
}
