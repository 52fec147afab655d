use axum::{RequestPartsExt, extract::FromRequestParts};
use axum_extra::{TypedHeader, headers};
use http::{HeaderMap, StatusCode, request::Parts};

use oauth2_signin::{PageSession, SESSION_COOKIE_NAME, load_or_create_session};

use crate::error::IntoResponseError;

/// The visitor's page session, available as an Axum extractor
///
/// Reads the session cookie and loads the matching page session. A visitor
/// without a cookie, or with a cookie the store no longer knows, gets a fresh
/// session; `set_cookie` then carries the header that hands its id to the
/// browser and must be attached to the response.
#[derive(Debug, Clone)]
pub struct PageVisitor {
    pub session_id: String,
    pub session: PageSession,
    pub set_cookie: Option<HeaderMap>,
}

impl PageVisitor {
    /// Headers to attach to the response; empty when the cookie is already set
    pub fn cookie_headers(&mut self) -> HeaderMap {
        self.set_cookie.take().unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for PageVisitor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extract::<TypedHeader<headers::Cookie>>().await.ok();
        let session_id = cookies
            .as_ref()
            .and_then(|cookies| cookies.get(SESSION_COOKIE_NAME.as_str()));

        if session_id.is_none() {
            tracing::debug!("No session cookie on request");
        }

        let (loaded, set_cookie) = load_or_create_session(session_id)
            .await
            .into_response_error()?;

        Ok(Self {
            session_id: loaded.session_id,
            session: loaded.session,
            set_cookie,
        })
    }
}
