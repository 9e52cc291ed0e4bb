//!
//! # Application error handling
//!
//! This module defines the error type `AppError` used throughout the
//! application. Every failure a caller can observe falls into one of four
//! kinds — invalid input, conflict, unauthorized, not found — plus a generic
//! internal failure for unexpected database or server-side errors.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers
//! returning `Result<_, AppError>` produce the right status code and a JSON
//! body automatically. Internal failures are logged with their detail but
//! respond with a fixed generic message; nothing about the underlying cause
//! reaches the client.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// All failure outcomes surfaced by registries, services and handlers.
#[derive(Debug)]
pub enum AppError {
    /// A malformed or out-of-range field in the request (HTTP 400).
    InvalidInput(String),
    /// A uniqueness violation, e.g. registering an email twice (HTTP 409).
    Conflict(String),
    /// Missing, invalid or expired credentials, or credentials for a user
    /// that no longer exists (HTTP 401).
    Unauthorized(String),
    /// The record is absent, or exists but is owned by someone else — the two
    /// are deliberately indistinguishable (HTTP 404).
    NotFound(String),
    /// Unexpected database failure (HTTP 500, detail logged, not returned).
    Database(String),
    /// Any other unexpected server-side failure (HTTP 500, detail logged).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Database(detail) | AppError::Internal(detail) => {
                log::error!("internal error: {}", detail);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::InvalidInput(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg) => HttpResponse::build(self.status_code()).json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`. A unique-constraint violation maps to
/// `Conflict`: the database constraint is the final arbiter for concurrent
/// registrations that pass the existence check simultaneously. Everything
/// else is an opaque database failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Resource already exists".into())
            }
            _ => AppError::Database(error.to_string()),
        }
    }
}
