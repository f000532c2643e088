// src/config.rs
use std::time::Duration;

use crate::errors::{ClientError, Result};

const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/v1";
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
const DEFAULT_POLL_DEADLINE_MS: u64 = 30_000;

/// Runtime settings for a conformance run, loaded from environment
/// variables with sensible defaults for a locally running orchestrator.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the orchestrator API, e.g. `http://localhost:8080/api/v1`.
    pub endpoint: String,
    /// Sleep between result polls of a pending submission.
    pub poll_interval: Duration,
    /// How long `calculate` waits for resolution before raising `Timeout`.
    pub poll_deadline: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables: `CALC_ENDPOINT`,
    /// `CALC_POLL_INTERVAL_MS`, `CALC_POLL_DEADLINE_MS`.
    pub fn from_env() -> Result<Self> {
        let endpoint =
            std::env::var("CALC_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let poll_interval = duration_from_env("CALC_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        let poll_deadline = duration_from_env("CALC_POLL_DEADLINE_MS", DEFAULT_POLL_DEADLINE_MS)?;

        if endpoint.is_empty() {
            return Err(ClientError::Config(
                "CALC_ENDPOINT must not be empty".to_string(),
            ));
        }

        Ok(AppConfig {
            endpoint,
            poll_interval,
            poll_deadline,
        })
    }
}

fn duration_from_env(var: &str, default_ms: u64) -> Result<Duration> {
    match std::env::var(var) {
        Ok(value) => {
            let ms: u64 = value
                .parse()
                .map_err(|_| ClientError::Config(format!("{} must be an integer, got '{}'", var, value)))?;
            Ok(Duration::from_millis(ms))
        }
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}
