use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub identity_webhook_secret: String,
    pub identity_webhook_tolerance_secs: i64,
    pub restate_ingress_url: String,
    pub cache_purge_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            identity_webhook_secret: env::var("IDENTITY_WEBHOOK_SECRET")
                .context("IDENTITY_WEBHOOK_SECRET must be set")?,
            identity_webhook_tolerance_secs: env::var("IDENTITY_WEBHOOK_TOLERANCE_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .context("IDENTITY_WEBHOOK_TOLERANCE_SECS must be a valid number")?,
            restate_ingress_url: env::var("RESTATE_INGRESS_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            cache_purge_url: env::var("CACHE_PURGE_URL").ok(),
        })
    }
}
