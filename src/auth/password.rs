use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a password with a per-call random salt. Two hashes of the same
/// input differ, but both verify against it.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// True iff `password` matches the stored hash. A malformed stored hash is an
/// internal error, never a user-facing one.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
