//! Centralized configuration (environment variables + defaults).
//!
//! Backend-related variables are all optional: a missing `DATABASE_URL` or
//! `GEMINI_API_KEY` selects local-only / identification-unavailable mode
//! instead of failing startup.

use std::path::PathBuf;

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Postgres connection string. `None` means local-only mode.
pub fn database_url() -> Option<String> {
    non_empty_var("DATABASE_URL")
}

/// Vision model API key. `None` disables identification (placeholder-only).
pub fn gemini_api_key() -> Option<String> {
    non_empty_var("GEMINI_API_KEY")
}

/// Vision model name.
pub fn gemini_model() -> String {
    non_empty_var("GEMINI_MODEL").unwrap_or_else(|| "gemini-1.5-flash".to_string())
}

/// Request timeout for vision calls, in seconds.
pub fn gemini_timeout_secs() -> u64 {
    non_empty_var("GEMINI_TIMEOUT_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(30)
        .max(1)
}

/// Server bind address, from `PORT` (default 3000).
pub fn bind_addr() -> String {
    let port = non_empty_var("PORT")
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(3000);
    format!("0.0.0.0:{port}")
}

/// Where the local-mode like state is persisted.
pub fn local_likes_path() -> PathBuf {
    non_empty_var("LOCAL_LIKES_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("plantid_likes.json"))
}
