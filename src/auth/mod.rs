// Authentication module
// Cookie-carried JWT sessions: issuance, verification and owner checks

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{issue_session_handler, logout_handler};
pub use middleware::{authenticate, require_session, SessionIdentity};
pub use models::{IdentityRequest, SessionResponse};
pub use session::{SessionCookie, SESSION_COOKIE};
pub use token::{Claims, TokenService, SESSION_DURATION_SECS};
