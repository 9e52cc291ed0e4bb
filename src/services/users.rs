//! User registry: registration and credential authentication.
//!
//! Validation happens here rather than at the transport boundary so the
//! checks run in a fixed order: email shape, then duplicate email, then
//! password length. An already-registered email is a conflict no matter what
//! password accompanies it.

use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::User;

lazy_static! {
    // local@domain.tld: non-empty local part, single '@', domain with a dot.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Registers a new account and returns the stored user.
///
/// The existence check and the insert are not atomic; the unique constraint
/// on `users.email` settles concurrent registrations, and a violation at
/// insert time surfaces as `Conflict` via the `sqlx::Error` conversion.
pub async fn register(pool: &PgPool, email: &str, password: &str) -> Result<User, AppError> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(AppError::InvalidInput("Invalid email format".into()));
    }

    if find_by_email(pool, email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    if password.chars().count() < 8 {
        return Err(AppError::InvalidInput(
            "Password must be at least 8 characters".into(),
        ));
    }

    let password_hash = hash_password(password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2)
         RETURNING id, email, password_hash, created_at, updated_at",
    )
    .bind(email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Authenticates an email/password pair.
///
/// Returns `None` both when the email is unknown and when the password does
/// not verify; the caller maps either to the same failure response.
pub async fn authenticate(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let user = match find_by_email(pool, email).await? {
        Some(user) => user,
        None => return Ok(None),
    };

    if !verify_password(password, &user.password_hash)? {
        return Ok(None);
    }

    Ok(Some(user))
}

pub async fn find_by_id(pool: &PgPool, user_id: i32) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Lookup by exact, case-sensitive email match.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
