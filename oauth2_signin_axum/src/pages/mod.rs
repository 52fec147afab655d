mod minimal;
mod page;

use axum::{
    Router,
    routing::{get, post},
};

use crate::router::SigninState;

/// Create a router for the sign-in page endpoints
pub(crate) fn router() -> Router<SigninState> {
    Router::new()
        .route("/", get(page::page))
        .route("/logout", post(page::logout))
        .route("/preferences", post(page::preferences))
        .route("/minimal", get(minimal::minimal))
        .route("/signin.css", get(page::serve_signin_css))
}
