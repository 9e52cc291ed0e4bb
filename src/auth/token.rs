use crate::config::Config;
use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims encoded within an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies signed, expiring bearer tokens.
///
/// Keys, algorithm and lifetime come from `Config` at construction and never
/// change afterwards. Tokens are self-contained: expiry is the only
/// invalidation mechanism, and `verify` does not consult any server-side
/// state.
pub struct TokenService {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenService {
    /// Builds the service from startup configuration.
    ///
    /// Panics on an unsupported `JWT_ALGORITHM`, consistent with the rest of
    /// the fail-fast configuration loading.
    pub fn from_config(config: &Config) -> Self {
        let algorithm = config
            .jwt_algorithm
            .parse::<Algorithm>()
            .expect("JWT_ALGORITHM must be a supported signing algorithm");

        let mut validation = Validation::new(algorithm);
        // A token whose expiry is at or before now must fail; the default
        // 60 second leeway would let it pass.
        validation.leeway = 0;

        Self {
            header: Header::new(algorithm),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl: chrono::Duration::days(config.token_ttl_days),
        }
    }

    /// Produces a signed token for `user_id`, expiring `TOKEN_TTL_DAYS` from
    /// now.
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Token expiry overflows the calendar".into()))?
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id,
            exp: expiration,
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry, returning the embedded user id
    /// verbatim. Whether that user still exists is the identity resolver's
    /// concern, not this one's.
    pub fn verify(&self, token: &str) -> Result<i32, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}
