use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, TokenService},
    error::AppError,
    services::users,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Register a new user
///
/// Creates a new account and returns it along with an access token.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user = users::register(pool.get_ref(), &payload.email, &payload.password).await?;
    let access_token = tokens.issue(user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse::new(user.id, user.email, access_token)))
}

/// Login
///
/// Authenticates an email/password pair and returns an access token. An
/// unknown email and a wrong password produce identical responses.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user = users::authenticate(pool.get_ref(), &payload.email, &payload.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    let access_token = tokens.issue(user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse::new(user.id, user.email, access_token)))
}
