// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Process-wide configuration snapshot, read once at startup and immutable
/// afterwards. Required variables abort the process when missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds. Also used as the cookie max-age.
    pub jwt_expiration: u64,
    pub port: u16,
    /// "development" or "production". Controls the Secure flag on the
    /// auth cookie.
    pub environment: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30 * 24 * 60 * 60);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5001);

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            port,
            environment,
            rust_log,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
