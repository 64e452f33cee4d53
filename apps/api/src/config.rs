use anyhow::{Context, Result};

use crate::roadmap::link_validator::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_MS};

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const PRIMARY_ORIGIN: &str = "https://pathwise.app";

const DEV_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Application configuration loaded from environment variables.
///
/// `GEMINI_API_KEY` is deliberately optional here: a missing credential is
/// reported per request as a configuration error, before any upstream call.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub roadmap_model: String,
    pub alternative_model: String,
    pub link_check_timeout_ms: u64,
    pub link_check_concurrency: usize,
    pub generation_deadline_secs: u64,
    /// First entry is the primary production origin, used as the CORS fallback.
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            roadmap_model: std::env::var("ROADMAP_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            alternative_model: std::env::var("ALTERNATIVE_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            link_check_timeout_ms: parse_env("LINK_CHECK_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
            link_check_concurrency: parse_env("LINK_CHECK_CONCURRENCY", DEFAULT_CONCURRENCY)?,
            generation_deadline_secs: parse_env("GENERATION_DEADLINE_SECS", 300)?,
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|_| default_origins()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The origin echoed back when a caller's origin is not on the allow-list.
    pub fn primary_origin(&self) -> &str {
        self.allowed_origins
            .first()
            .map(String::as_str)
            .unwrap_or(PRIMARY_ORIGIN)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if origins.is_empty() {
        default_origins()
    } else {
        origins
    }
}

fn default_origins() -> Vec<String> {
    std::iter::once(PRIMARY_ORIGIN)
        .chain(DEV_ORIGINS.iter().copied())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/roadmaps_test".to_string(),
        gemini_api_key: Some("test-key".to_string()),
        gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
        roadmap_model: DEFAULT_MODEL.to_string(),
        alternative_model: DEFAULT_MODEL.to_string(),
        link_check_timeout_ms: DEFAULT_TIMEOUT_MS,
        link_check_concurrency: 4,
        generation_deadline_secs: 30,
        allowed_origins: default_origins(),
        port: 8080,
        rust_log: "debug".to_string(),
    }
}
