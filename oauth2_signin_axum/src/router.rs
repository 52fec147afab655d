//! Router for the sign-in page endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use oauth2_signin::ProviderContext;

/// Shared handler state
///
/// `provider` is `None` when the OAuth2 client could not be configured; the
/// pages then render their "not configured" view.
#[derive(Clone, Default)]
pub struct SigninState {
    pub provider: Option<ProviderContext>,
}

/// Create a router for the sign-in page
///
/// The endpoints will be available at:
/// - {O2S_ROUTE_PREFIX}/ (the page, also the OAuth2 redirect target)
/// - {O2S_ROUTE_PREFIX}/logout
/// - {O2S_ROUTE_PREFIX}/preferences
/// - {O2S_ROUTE_PREFIX}/minimal
/// - {O2S_ROUTE_PREFIX}/signin.css
pub fn oauth2_signin_router(provider: Option<ProviderContext>) -> Router {
    oauth2_signin_router_no_trace(provider).layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `oauth2_signin_router()` but without the HTTP tracing middleware
pub fn oauth2_signin_router_no_trace(provider: Option<ProviderContext>) -> Router {
    super::pages::router().with_state(SigninState { provider })
}
