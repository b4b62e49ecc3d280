// Session authentication middleware for protected routes

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::{debug, warn};

use crate::auth::{error::AuthError, session::SessionCookie, token::TokenService};
use crate::AppState;

/// Verified identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq)]
pub struct SessionIdentity {
    pub email: String,
}

impl SessionIdentity {
    /// Reject with `OwnerMismatch` unless `requested` is this identity's email
    pub fn ensure_owner(&self, requested: Option<&str>) -> Result<(), AuthError> {
        match requested {
            Some(email) if email == self.email => Ok(()),
            _ => Err(AuthError::OwnerMismatch {
                identity: self.email.clone(),
                requested: requested.map(str::to_string),
            }),
        }
    }
}

/// Resolve the session identity from the request cookies
pub fn authenticate(tokens: &TokenService, jar: &CookieJar) -> Result<SessionIdentity, AuthError> {
    let token = SessionCookie::token(jar).ok_or(AuthError::MissingToken)?;
    let claims = tokens.verify(&token)?;
    Ok(SessionIdentity {
        email: claims.email,
    })
}

/// Middleware rejecting requests without a valid session cookie.
///
/// On success the [`SessionIdentity`] is stored in the request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let endpoint = request.uri().path().to_string();

    let identity = authenticate(&state.tokens, &jar).map_err(|e| {
        warn!("Session rejected for endpoint {}: {}", endpoint, e);
        e
    })?;

    debug!("Session verified: email={}, endpoint={}", identity.email, endpoint);
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionIdentity>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
