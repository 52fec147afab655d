//! Central configuration for the oauth2_signin crate

use std::sync::LazyLock;

/// Route prefix under which the sign-in pages are mounted
///
/// Default: "" (pages live at the site root)
pub static O2S_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| std::env::var("O2S_ROUTE_PREFIX").unwrap_or_default());

/// Short timezone name used to display the last login time
///
/// Default: "UTC"
pub static O2S_DISPLAY_TIMEZONE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("O2S_DISPLAY_TIMEZONE").unwrap_or_else(|_| "UTC".to_string())
});
