// Session DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Identity presented to POST /jwt
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct IdentityRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// Body returned by the session endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
}

impl SessionResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
