use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::User;
use crate::services::users;

/// The authenticated caller, resolved from the request's bearer token.
///
/// Extraction verifies the token, then confirms the embedded user id still
/// maps to a row in `users`; either failing yields 401. Handlers that take
/// `CurrentUser` as a parameter are thereby protected, and get the full user
/// record for ownership scoping.
///
/// Resolution has no side effects and may run concurrently and repeatedly
/// for the same token.
pub struct CurrentUser(pub User);

fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = bearer_token(&req)?;

            let tokens = req
                .app_data::<web::Data<TokenService>>()
                .ok_or_else(|| AppError::Internal("TokenService not registered".into()))?;
            let user_id = tokens.verify(&token)?;

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .ok_or_else(|| AppError::Internal("Database pool not registered".into()))?;
            let user = users::find_by_id(pool.get_ref(), user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Unauthorized("Invalid authentication credentials".into())
                })?;

            Ok(CurrentUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::core::prelude::v1::test]
    fn test_bearer_token_extraction() {
        let req = test::TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[::core::prelude::v1::test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        let req = test::TestRequest::default().to_http_request();
        assert!(matches!(
            bearer_token(&req),
            Err(AppError::Unauthorized(_))
        ));

        // Wrong scheme
        let req = test::TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(matches!(
            bearer_token(&req),
            Err(AppError::Unauthorized(_))
        ));
    }
}
