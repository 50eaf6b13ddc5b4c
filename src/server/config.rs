/**
 * Server Configuration
 *
 * This module loads and validates the server configuration from environment
 * variables. Configuration is read exactly once at startup into an
 * `AppConfig`; nothing else in the application touches the environment.
 *
 * # Variables
 *
 * - `SECRET_KEY` - session-cookie signing secret (required)
 * - `DATABASE_URL` - user store connection string (required)
 * - `CLIENT_ID` / `CLIENT_SECRET` / `CALL_BACK_URL` - Google OAuth
 *   credentials and redirect URL (required)
 * - `SERVER_PORT` - listen port, defaults to 3000
 *
 * # Error Handling
 *
 * A missing or malformed value is a hard error: the server refuses to start
 * rather than limping along without sessions or a store.
 */

use thiserror::Error;

use crate::auth::google::GoogleOAuth;

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {message}")]
    InvalidVar { name: &'static str, message: String },
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// User store connection string
    pub database_url: String,
    /// Secret used to sign session cookies
    pub secret_key: String,
    /// Google OAuth client (credentials + endpoints)
    pub google: GoogleOAuth,
    /// Port the server listens on
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any required variable is missing or cannot
    /// be parsed. The caller is expected to abort startup on error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let secret_key = require("SECRET_KEY")?;

        let client_id = require("CLIENT_ID")?;
        let client_secret = require("CLIENT_SECRET")?;
        let callback_url = require("CALL_BACK_URL")?;

        let google = GoogleOAuth::new(client_id, client_secret, callback_url).map_err(|e| {
            ConfigError::InvalidVar {
                name: "CALL_BACK_URL",
                message: e.to_string(),
            }
        })?;

        let port = parse_port(std::env::var("SERVER_PORT").ok())?;

        Ok(Self {
            database_url,
            secret_key,
            google,
            port,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_port(value: Option<String>) -> Result<u16, ConfigError> {
    match value {
        None => Ok(3000),
        Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
            name: "SERVER_PORT",
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_to_3000() {
        assert_eq!(parse_port(None).unwrap(), 3000);
    }

    #[test]
    fn test_port_parses_override() {
        assert_eq!(parse_port(Some("8080".to_string())).unwrap(), 8080);
    }

    #[test]
    fn test_port_rejects_garbage() {
        let err = parse_port(Some("not-a-port".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "SERVER_PORT", .. }));
    }
}
