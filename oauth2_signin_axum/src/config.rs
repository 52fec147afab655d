//! Page URLs derived from the route prefix

use std::sync::LazyLock;

use oauth2_signin::O2S_ROUTE_PREFIX;

/// URL of the sign-in page, the target of every redirect back to the page
/// Default: "/" when no route prefix is set, otherwise the prefix itself
pub static O2S_PAGE_URL: LazyLock<String> = LazyLock::new(|| page_url(O2S_ROUTE_PREFIX.as_str()));

/// Provider name shown on the login link
/// Default: "Google"
pub static O2S_PROVIDER_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("O2S_PROVIDER_NAME")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "Google".to_string())
});

fn page_url(route_prefix: &str) -> String {
    if route_prefix.is_empty() {
        "/".to_string()
    } else {
        route_prefix.to_string()
    }
}
