pub mod task;
pub mod user;

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::error::AppError;

pub use task::{Task, TaskChanges, TaskInput, TaskPatch};
pub use user::{AuthToken, Credentials, NewUser, PasswordChange, PublicUser, User, AUTH_ACCESS};

lazy_static! {
    // Canonical hyphenated UUID, the only id form the stores hand out.
    static ref ID_REGEX: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
}

/// Parses a record identifier taken from a request path.
///
/// Anything that is not a canonical UUID is rejected with `AppError::MalformedId`
/// so that no store lookup happens for it.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    if !ID_REGEX.is_match(raw) {
        return Err(AppError::MalformedId);
    }
    Uuid::parse_str(raw).map_err(|_| AppError::MalformedId)
}
