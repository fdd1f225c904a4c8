use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::User;

/// The authenticated caller of a request.
///
/// Inserted into the request extensions by `AuthGate` and extracted by handlers
/// on gated routes. Extraction fails with `AppError::Unauthorized` when the gate
/// did not run, so a handler mounted outside the gate can never see a caller.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    /// The raw token the request was authenticated with.
    pub token: String,
}

impl FromRequest for AuthContext {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthContext>().cloned() {
            Some(context) => ready(Ok(context)),
            None => ready(Err(AppError::Unauthorized.into())),
        }
    }
}
