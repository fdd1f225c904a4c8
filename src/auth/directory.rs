use std::sync::Arc;

use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::{AuthToken, NewUser, PasswordChange, User, AUTH_ACCESS};
use crate::store::CredentialStore;

/// Manages user identity: registration, credential checks and session tokens.
///
/// The password hash is computed exactly once per `register` or
/// `change_password` call, and only from the plaintext supplied to that call.
pub struct UserDirectory {
    store: Arc<dyn CredentialStore>,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    /// Creates a user and opens a first session for it.
    ///
    /// The email is trimmed and must be well formed; the password must be at
    /// least 8 characters. Fails with `DuplicateEmail` if the email is taken.
    pub async fn register(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let input = NewUser::new(email, password);
        input.validate()?;

        if self.store.find_user_by_email(&input.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(input.password, self.bcrypt_cost).await?;
        let mut user = User::new(input.email, password_hash);

        // The first session is written together with the user row.
        let token = self.tokens.issue(user.id)?;
        user.tokens.push(AuthToken::auth(token.clone()));
        self.store.insert_user(&user).await?;

        log::info!("registered user {}", user.id);
        Ok((user, token))
    }

    /// Checks an email/password pair and opens a new session.
    ///
    /// An unknown email and a wrong password fail identically with `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let mut user = match self.store.find_user_by_email(email.trim()).await? {
            Some(user) => user,
            None => return Err(AppError::InvalidCredentials),
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(&mut user).await?;
        log::info!("user {} logged in", user.id);
        Ok((user, token))
    }

    /// Resolves a session token to its user.
    ///
    /// The signature must verify and the exact token must still be listed on
    /// the user with the `auth` scope, so revoked tokens fail here.
    pub async fn resolve_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.verify(token)?;
        if claims.access != AUTH_ACCESS {
            return Err(AppError::Unauthorized);
        }

        self.store
            .find_user_by_token(claims.sub, AUTH_ACCESS, token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Removes `token` from the user's session list. Removing an absent token is a no-op.
    pub async fn revoke_token(&self, user: &User, token: &str) -> Result<(), AppError> {
        self.store.pull_token(user.id, token).await?;
        log::info!("user {} logged out", user.id);
        Ok(())
    }

    /// Replaces the user's password. Existing sessions stay valid.
    pub async fn change_password(&self, user: &User, change: PasswordChange) -> Result<User, AppError> {
        change.validate()?;

        let password_hash = hash_password(change.password, self.bcrypt_cost).await?;
        self.store.update_password_hash(user.id, &password_hash).await?;

        log::info!("user {} changed password", user.id);
        Ok(User {
            password_hash,
            ..user.clone()
        })
    }

    async fn issue_token(&self, user: &mut User) -> Result<String, AppError> {
        let token = self.tokens.issue(user.id)?;
        let entry = AuthToken::auth(token.clone());
        self.store.push_token(user.id, &entry).await?;
        user.tokens.push(entry);
        Ok(token)
    }
}
