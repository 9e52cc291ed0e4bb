pub mod identity;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export necessary items
pub use identity::CurrentUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Payload for a new account registration. Email shape and password length
/// are checked by the user registry, in order, so that a duplicate email is
/// reported as a conflict regardless of the password supplied.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Payload for a login request. Deliberately unvalidated: a malformed email
/// or short password fails lookup/verification and yields the same response
/// as any other bad credential.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful registration or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: i32,
    pub email: String,
    pub access_token: String,
    pub token_type: String,
}

impl AuthResponse {
    pub fn new(id: i32, email: String, access_token: String) -> Self {
        Self {
            id,
            email,
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_uses_bearer_token_type() {
        let response = AuthResponse::new(7, "test@example.com".into(), "tok".into());
        assert_eq!(response.token_type, "bearer");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["access_token"], "tok");
        assert_eq!(json["token_type"], "bearer");
    }
}
