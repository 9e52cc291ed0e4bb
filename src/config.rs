use std::env;

/// Application configuration, read once at startup and immutable afterwards.
///
/// The signing secret, algorithm and token lifetime are consumed by
/// `TokenService::from_config`; nothing reads the environment after boot.
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub jwt_algorithm: String,
    pub token_ttl_days: i64,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
            token_ttl_days: env::var("TOKEN_TTL_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("TOKEN_TTL_DAYS must be a number"),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("JWT_SECRET", "test-secret");
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
        env::remove_var("JWT_ALGORITHM");
        env::remove_var("TOKEN_TTL_DAYS");
        env::remove_var("ALLOWED_ORIGINS");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.jwt_algorithm, "HS256");
        assert_eq!(config.token_ttl_days, 7);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");

        // Custom values, including a comma-separated origin list with a
        // trailing comma and surrounding whitespace.
        env::set_var("SERVER_PORT", "3000");
        env::set_var("TOKEN_TTL_DAYS", "30");
        env::set_var(
            "ALLOWED_ORIGINS",
            "http://localhost:3000, https://app.example.com,",
        );

        let config = Config::from_env();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.token_ttl_days, 30);
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );

        env::remove_var("SERVER_PORT");
        env::remove_var("TOKEN_TTL_DAYS");
        env::remove_var("ALLOWED_ORIGINS");
    }
}
