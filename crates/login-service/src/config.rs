use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Symmetric token-signing secret. Loaded once at startup, never
    /// mutated afterwards.
    pub signing_secret: SecretString,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid signing secret: {0}")]
    InvalidSigningSecret(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let signing_secret = vars
            .get("SIGNING_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("SIGNING_SECRET".to_string()))?;

        // An empty secret is a fatal misconfiguration; refuse to serve.
        if signing_secret.is_empty() {
            return Err(ConfigError::InvalidSigningSecret(
                "must not be empty".to_string(),
            ));
        }

        Ok(Config {
            database_url,
            bind_address,
            signing_secret: SecretString::from(signing_secret.clone()),
        })
    }
}
