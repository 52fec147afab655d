//! Test helpers shared by the handler tests
//!
//! The pages are driven through their handlers with an in-process identity
//! provider; no network is involved.

use async_trait::async_trait;
use axum::{body::to_bytes, response::Response};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use oauth2_signin::{
    IdentityProvider, LoadedSession, OAuth2Error, ProviderContext, TokenResponse, UserInfo,
    load_or_create_session,
};

use crate::router::SigninState;
use crate::session::PageVisitor;

/// Code accepted by [`CodeProvider`]
pub(crate) const VALID_CODE: &str = "abc";

/// Identity provider that accepts a single authorization code
#[derive(Default)]
pub(crate) struct CodeProvider {
    exchanges: AtomicUsize,
}

impl CodeProvider {
    pub(crate) fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for CodeProvider {
    fn authorization_url(
        &self,
        redirect_uri: &str,
        scopes: &[&str],
    ) -> Result<String, OAuth2Error> {
        Ok(format!(
            "https://idp.example.com/auth?redirect_uri={}&scope={}",
            urlencoding::encode(redirect_uri),
            scopes.join("+")
        ))
    }

    async fn exchange_code_for_token(
        &self,
        _redirect_uri: &str,
        code: &str,
    ) -> Result<TokenResponse, OAuth2Error> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        if code != VALID_CODE {
            return Err(OAuth2Error::TokenExchange("400 Bad Request".to_string()));
        }
        Ok(TokenResponse {
            access_token: "tok1".to_string(),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3599),
            scope: None,
            id_token: None,
        })
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, OAuth2Error> {
        if access_token != "tok1" {
            return Err(OAuth2Error::FetchUserInfo("401 Unauthorized".to_string()));
        }
        Ok(UserInfo {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            picture: "http://x/p.png".to_string(),
        })
    }
}

pub(crate) fn configured_state() -> (SigninState, Arc<CodeProvider>) {
    let provider = Arc::new(CodeProvider::default());
    let context = ProviderContext::new(
        provider.clone(),
        "http://localhost:3001/",
        "http://localhost:3001/minimal",
    );
    (
        SigninState {
            provider: Some(context),
        },
        provider,
    )
}

pub(crate) async fn new_session() -> LoadedSession {
    let (loaded, _) = load_or_create_session(None)
        .await
        .expect("session store should be available");
    loaded
}

pub(crate) async fn reload(session_id: &str) -> LoadedSession {
    let (loaded, set_cookie) = load_or_create_session(Some(session_id))
        .await
        .expect("session store should be available");
    assert!(set_cookie.is_none(), "session {session_id} was not stored");
    loaded
}

pub(crate) async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Visitor whose cookie the browser already holds
pub(crate) fn returning_visitor(loaded: LoadedSession) -> PageVisitor {
    PageVisitor {
        session_id: loaded.session_id,
        session: loaded.session,
        set_cookie: None,
    }
}
