use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default; the service starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upload size cap in bytes.
    pub max_upload_bytes: usize,
    /// Cap on skills taken from a freeform skills section per document.
    pub freeform_skill_cap: usize,
    /// Remote job feed endpoint. Sync is disabled when unset.
    pub jobs_feed_url: Option<String>,
    /// JSON file the job store mirrors itself to. In-memory only when unset.
    pub jobs_store_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            freeform_skill_cap: parse_env("FREEFORM_SKILL_CAP", 10)?,
            jobs_feed_url: optional_env("JOBS_FEED_URL"),
            jobs_store_path: optional_env("JOBS_STORE_PATH").map(PathBuf::from),
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
