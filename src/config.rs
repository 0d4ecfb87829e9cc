//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. The point-card API key is held as
//! an `Option` because its absence is a per-request failure ("Server
//! configuration error" with no outbound call), not a startup abort.

use std::env;

/// Default edge-function endpoint for the point-card service.
const DEFAULT_POINT_CARD_FUNCTION_URL: &str =
    "https://slrlavptojlkvujoiied.functions.supabase.co/link-profile";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// SQLite database URL
    pub database_url: String,
    /// Point-card edge function endpoint
    pub point_card_function_url: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// HS256 secret used by the auth provider to sign session tokens
    pub session_jwt_secret: Vec<u8>,
    /// Shared secret for the point-card edge function (`x-api-key`).
    /// `None` makes claim/fetch fail closed with a configuration error.
    pub point_card_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://fansite.db".to_string()),
            point_card_function_url: env::var("POINT_CARD_FUNCTION_URL")
                .unwrap_or_else(|_| DEFAULT_POINT_CARD_FUNCTION_URL.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            session_jwt_secret: env::var("SESSION_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("SESSION_JWT_SECRET"))?
                .into_bytes(),
            point_card_api_key: env::var("POINT_CARD_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            database_url: "sqlite::memory:".to_string(),
            point_card_function_url: "http://127.0.0.1:9".to_string(),
            port: 8080,
            session_jwt_secret: b"test_session_secret_32_bytes!!!".to_vec(),
            point_card_api_key: Some("test_api_key".to_string()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
