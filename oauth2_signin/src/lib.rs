//! oauth2_signin - Sign-in page core for a single external OAuth2 identity provider
//!
//! This crate completes the OAuth2 authorization-code exchange, keeps per-visitor
//! page session state (profile fields, display toggles, idle timeout) in a
//! server-side store and turns that state into a declarative view for a renderer.

mod config;
mod errors;
mod lifecycle;
mod oauth2;
mod session;
mod storage;
mod utils;
mod view;

pub use config::{O2S_DISPLAY_TIMEZONE, O2S_ROUTE_PREFIX};
pub use errors::SigninError;

pub use oauth2::{
    IdentityProvider, OAuth2Client, OAuth2Config, OAuth2Error, ProviderContext, TokenResponse,
    UserInfo,
};

pub use session::{
    DisplayPreferences, INACTIVITY_TIMEOUT, LoadedSession, PageSession, SESSION_COOKIE_NAME,
    SessionError, load_or_create_session, remove_session, save_session,
};

pub use lifecycle::{
    LifecycleState, MinimalOutcome, Notice, PageOutcome, PageRequest, PreferenceUpdate,
    evaluate_minimal, evaluate_page_load,
};

pub use view::{DashboardView, LoginView, PageView, format_login_time};

/// Initialize the sign-in core
///
/// Brings up the session store and tries to build the identity provider client
/// from the environment. A missing or invalid configuration is not fatal: it is
/// logged and `None` is returned so the page can show its "not configured" view.
pub async fn init() -> Result<Option<ProviderContext>, SigninError> {
    storage::init().await?;

    match ProviderContext::from_env() {
        Ok(context) => {
            tracing::info!("OAuth2 client configured for {}", context.redirect_uri);
            Ok(Some(context))
        }
        Err(e) => {
            tracing::warn!("OAuth2 client not initialized: {}", e);
            Ok(None)
        }
    }
}
