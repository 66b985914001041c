use anyhow::{bail, Context, Result};

/// Which backend holds session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis { url: String },
}

/// Application configuration loaded from environment variables.
///
/// The narrative generator and Redis are optional: without
/// `ANTHROPIC_API_KEY` the engine synthesizes strategies locally, and
/// without `SESSION_BACKEND=redis` sessions live in memory.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub anthropic_api_key: Option<String>,
    pub session_backend: SessionBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_backend = match optional_env("SESSION_BACKEND").as_deref() {
            None | Some("memory") => SessionBackend::Memory,
            Some("redis") => {
                let url = optional_env("REDIS_URL")
                    .context("REDIS_URL is required when SESSION_BACKEND=redis")?;
                SessionBackend::Redis { url }
            }
            Some(other) => bail!("SESSION_BACKEND must be 'memory' or 'redis', got '{other}'"),
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            session_backend,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
