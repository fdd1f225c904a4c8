use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Access scope recorded next to every session token.
pub const AUTH_ACCESS: &str = "auth";

/// One session token held on a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access: String,
    pub token: String,
}

impl AuthToken {
    pub fn auth(token: impl Into<String>) -> Self {
        Self {
            access: AUTH_ACCESS.to_string(),
            token: token.into(),
        }
    }
}

/// A user record as persisted by the credential store.
///
/// Not `Serialize` on purpose: the only outward representation is `PublicUser`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub tokens: Vec<AuthToken>,
}

impl User {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            tokens: Vec::new(),
        }
    }

    /// Whether `token` is still listed on this user with the `auth` scope.
    pub fn holds_token(&self, token: &str) -> bool {
        self.tokens
            .iter()
            .any(|t| t.access == AUTH_ACCESS && t.token == token)
    }

    pub fn public_view(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// The serialized form of a user. Never carries the hash or the token list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

/// Body of `POST /users` and `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration input after trimming, checked before anything is persisted.
#[derive(Debug, Validate)]
pub struct NewUser {
    #[validate(email, length(min = 5), custom = "validate_email_domain")]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

impl NewUser {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }
}

/// The domain part must have a top-level suffix: `a@x.com`, not `a@x`.
fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let domain = email.rsplit_once('@').map(|(_, domain)| domain).unwrap_or("");
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && tld.len() >= 2 => Ok(()),
        _ => Err(ValidationError::new("email_domain")),
    }
}

/// Body of `PATCH /users/me/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordChange {
    #[validate(length(min = 8))]
    pub password: String,
}
