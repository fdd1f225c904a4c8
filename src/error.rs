//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a handler, the auth gate, a service or a store can produce is one of its
//! variants, and each variant knows which HTTP response it becomes.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return
//! `Result<_, AppError>` directly. Responses never carry store or hashing error text:
//! those details are logged and the client only sees a generic message.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` allow the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing, invalid or revoked session token (HTTP 401, empty body).
    Unauthorized,
    /// Malformed request body or parameters (HTTP 400).
    BadRequest(String),
    /// A field failed validation (HTTP 400). The message names the offending field.
    ValidationError(String),
    /// Registration attempted with an email that already belongs to a user (HTTP 400).
    DuplicateEmail,
    /// Login failed. Deliberately does not say whether the email or the password was wrong (HTTP 400).
    InvalidCredentials,
    /// A path identifier does not match the store's identifier grammar (HTTP 400).
    MalformedId,
    /// The record does not exist or is not owned by the caller (HTTP 404, empty body).
    NotFound,
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from the credential store (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DuplicateEmail => write!(f, "Email already registered"),
            AppError::InvalidCredentials => write!(f, "Invalid email or password"),
            AppError::MalformedId => write!(f, "Invalid id"),
            AppError::NotFound => write!(f, "Not Found"),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::DuplicateEmail
            | AppError::InvalidCredentials
            | AppError::MalformedId => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Unauthorized | AppError::NotFound => HttpResponse::build(status).finish(),
            AppError::BadRequest(msg) | AppError::ValidationError(msg) => {
                HttpResponse::build(status).json(json!({ "error": msg }))
            }
            AppError::DuplicateEmail | AppError::InvalidCredentials | AppError::MalformedId => {
                HttpResponse::build(status).json(json!({ "error": self.to_string() }))
            }
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                HttpResponse::build(status).json(json!({ "error": "Internal server error" }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound,
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// Only the names of the failing fields are echoed back.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        AppError::ValidationError(format!("invalid value for: {}", fields.join(", ")))
    }
}

/// Signature or structure failures while decoding a token.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        log::debug!("token rejected: {}", error);
        AppError::Unauthorized
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("password hashing failed: {}", error))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> AppError {
        AppError::InternalServerError(format!("blocking task failed: {}", error))
    }
}
