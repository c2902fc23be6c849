use std::env;

use crate::registry::{DEFAULT_CODE_LENGTH, DEFAULT_VALIDITY_MINUTES};

/// Process configuration, loaded once at startup from the environment
/// (`.env` supported via dotenvy in `main`).
#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Base used to build shareable links, e.g. `http://localhost:8080`.
    pub public_base_url: String,
    pub default_validity_minutes: i64,
    pub random_code_length: usize,
    pub log_level: String,
    /// Empty or unset means console-only logging.
    pub log_file: Option<String>,
    /// "json" for machine-readable log lines, anything else for plain text.
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

        Self {
            public_base_url,
            default_validity_minutes: env::var("DEFAULT_VALIDITY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_VALIDITY_MINUTES),
            random_code_length: env::var("RANDOM_CODE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_CODE_LENGTH),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_file: env::var("LOG_FILE").ok().filter(|f| !f.is_empty()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            server_host,
            server_port,
        }
    }
}
