use crate::{
    auth::{AuthContext, UserDirectory, AUTH_HEADER},
    error::AppError,
    models::{Credentials, PasswordChange},
};
use actix_web::{delete, get, patch, post, web, HttpResponse};

/// Register a new user
///
/// Returns the public user and a fresh session token in the `x-auth` header.
#[post("/users")]
pub async fn register(
    directory: web::Data<UserDirectory>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
    let (user, token) = directory.register(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok()
        .insert_header((AUTH_HEADER, token))
        .json(user.public_view()))
}

/// Login user
///
/// Any failure is reported as the same generic `400`.
#[post("/users/login")]
pub async fn login(
    directory: web::Data<UserDirectory>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
    let (user, token) = directory.authenticate(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok()
        .insert_header((AUTH_HEADER, token))
        .json(user.public_view()))
}

#[get("")]
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(auth.user.public_view())
}

/// Logout: revokes the token the request was made with.
#[delete("/token")]
pub async fn logout(
    directory: web::Data<UserDirectory>,
    auth: AuthContext,
) -> Result<HttpResponse, AppError> {
    directory.revoke_token(&auth.user, &auth.token).await?;
    Ok(HttpResponse::Ok().finish())
}

#[patch("/password")]
pub async fn change_password(
    directory: web::Data<UserDirectory>,
    auth: AuthContext,
    body: web::Json<PasswordChange>,
) -> Result<HttpResponse, AppError> {
    let user = directory
        .change_password(&auth.user, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user.public_view()))
}
