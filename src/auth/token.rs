// JWT session token issuance and verification

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session lifetime in seconds (1 hour)
pub const SESSION_DURATION_SECS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// Token service for JWT operations
///
/// Tokens are HS256-signed with a single shared secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with secret key
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_duration: SESSION_DURATION_SECS,
        }
    }

    /// Issue a session token bound to `email`
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            email: email.to_string(),
            iat: now,
            exp: now + self.session_duration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes")
    }

    #[test]
    fn test_session_expires_after_one_hour() {
        let service = test_token_service();
        let token = service.issue("a@x.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.email, "a@x.com");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            email: "a@x.com".to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        assert_eq!(test_token_service().verify(&token).unwrap_err(), AuthError::ExpiredToken);
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let token = TokenService::new("secret1").issue("a@x.com").unwrap();
        assert_eq!(
            TokenService::new("secret2").verify(&token).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();
        for token in ["", "not.a.token", "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature"] {
            assert_eq!(service.verify(token).unwrap_err(), AuthError::InvalidToken);
        }
    }

    proptest! {
        #[test]
        fn prop_issued_tokens_verify_with_identity(
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let service = test_token_service();
            let token = service.issue(&email).unwrap();
            let claims = service.verify(&token).unwrap();

            prop_assert_eq!(claims.email, email);
            prop_assert_eq!(claims.exp - claims.iat, SESSION_DURATION_SECS);
        }

        #[test]
        fn prop_random_strings_are_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            prop_assert!(test_token_service().verify(&malformed).is_err());
        }
    }
}
