use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use common::site::DEFAULT_LISTING_URL;
use dotenvy::dotenv;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub job_board_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            job_board_url: env::var("JOB_BOARD_URL")
                .unwrap_or_else(|_| DEFAULT_LISTING_URL.to_string()),
            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()
                    .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
