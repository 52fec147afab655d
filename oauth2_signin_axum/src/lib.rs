//! oauth2_signin_axum - Axum handlers, templates and router for the sign-in page
//!
//! Mount [`oauth2_signin_router`] under [`O2S_ROUTE_PREFIX`] after calling [`init`]:
//!
//! ```no_run
//! use axum::Router;
//! use oauth2_signin_axum::{O2S_ROUTE_PREFIX, init, oauth2_signin_router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = init().await?;
//! let app: Router = Router::new().nest(O2S_ROUTE_PREFIX.as_str(), oauth2_signin_router(provider));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod pages;
mod router;
mod session;

#[cfg(test)]
mod test_utils;

pub use config::{O2S_PAGE_URL, O2S_PROVIDER_NAME};
pub use error::IntoResponseError;
pub use router::{SigninState, oauth2_signin_router, oauth2_signin_router_no_trace};
pub use session::PageVisitor;

pub use oauth2_signin::{O2S_ROUTE_PREFIX, init};
