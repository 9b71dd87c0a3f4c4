//! Runtime configuration read from the environment.

use std::time::Duration;

use anyhow::Context;

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Start with the demo deck loaded.
    pub seed_demo_cards: bool,
    /// How many times a review is recomputed after a concurrent write.
    pub review_retry_limit: u32,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            seed_demo_cards: false,
            review_retry_limit: 3,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// Recognised variables: HOST, PORT, SEED_DEMO_CARDS, REVIEW_RETRY_LIMIT,
    /// REQUEST_TIMEOUT_SECS. Unset variables fall back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {value:?}"))?,
            None => defaults.port,
        };

        let seed_demo_cards = match lookup("SEED_DEMO_CARDS") {
            Some(value) => parse_bool(&value)
                .with_context(|| format!("SEED_DEMO_CARDS must be true or false, got {value:?}"))?,
            None => defaults.seed_demo_cards,
        };

        let review_retry_limit = match lookup("REVIEW_RETRY_LIMIT") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .with_context(|| format!("REVIEW_RETRY_LIMIT must be a number, got {value:?}"))?,
            None => defaults.review_retry_limit,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value.trim().parse().with_context(|| {
                    format!("REQUEST_TIMEOUT_SECS must be a number, got {value:?}")
                })?;
                anyhow::ensure!(secs > 0, "REQUEST_TIMEOUT_SECS must be greater than zero");
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            host,
            port,
            seed_demo_cards,
            review_retry_limit,
            request_timeout,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
