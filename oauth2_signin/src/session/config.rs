use chrono::TimeDelta;
use std::sync::LazyLock;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("__Host-SigninSession".to_string())
});

/// Seconds an untouched page session is kept in the store
pub(super) static SESSION_STORE_TTL: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SESSION_STORE_TTL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(86400) // Default to one day if not set or invalid
});

/// An authenticated session is signed out once more than this has passed since login
pub const INACTIVITY_TIMEOUT: TimeDelta = TimeDelta::minutes(30);
