use crate::error::AppError;
use crate::models::AUTH_ACCESS;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The user the token was issued to.
    pub sub: Uuid,
    /// Access scope, always `"auth"` for session tokens.
    pub access: String,
    /// Random per-token id so that two tokens for the same user never collide.
    pub jti: Uuid,
}

/// Issues and verifies signed session tokens.
///
/// Holds the process-wide signing secret, passed in at construction.
/// Verification only checks signature and structure: whether a token is still
/// active is decided by the user directory against the stored token list.
/// Tokens carry no `exp` claim and never expire on their own.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Generates a session token for `user_id`.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            access: AUTH_ACCESS.to_string(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies the signature of `token` and decodes its claims.
    ///
    /// Returns `AppError::Unauthorized` if the token is malformed or was not
    /// signed with this service's secret.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
