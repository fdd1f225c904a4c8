use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes `password` with a fresh salt at the given bcrypt cost.
///
/// bcrypt is CPU-bound, so the work runs on the blocking thread pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(password, cost)).await??;
    Ok(hashed)
}

pub async fn verify_password(password: String, hashed_password: String) -> Result<bool, AppError> {
    let matches =
        tokio::task::spawn_blocking(move || verify(password, &hashed_password)).await??;
    Ok(matches)
}
