//! Axum-based mock identity provider
//!
//! Each test starts its own server on an ephemeral port, so tests never share
//! provider state.

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use oauth2_signin::{OAuth2Config, ProviderContext};

pub const TEST_CLIENT_ID: &str = "test-client-id";
pub const TEST_CLIENT_SECRET: &str = "test-client-secret";
pub const TEST_REDIRECT_URI: &str = "http://localhost:3001/";

/// Code the mock provider accepts
pub const VALID_CODE: &str = "abc";
/// Token the mock provider issues for [`VALID_CODE`]
pub const ISSUED_TOKEN: &str = "tok1";

#[derive(Clone, Default)]
pub struct MockState {
    /// Endpoint paths hit, in order
    pub hits: Arc<Mutex<Vec<String>>>,
    /// Form bodies received by the token endpoint
    pub token_requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    /// When set, the user-info endpoint answers with this status
    pub userinfo_status: Arc<Mutex<Option<StatusCode>>>,
    /// When set, the user-info endpoint answers with this raw body
    pub userinfo_body: Arc<Mutex<Option<String>>>,
}

pub struct MockProviderServer {
    pub base_url: String,
    pub state: MockState,
}

impl MockProviderServer {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .route("/oauth2/token", post(token))
            .route("/oauth2/userinfo", get(userinfo))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock provider");
        let addr = listener.local_addr().expect("Mock provider has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock provider server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn config(&self) -> OAuth2Config {
        OAuth2Config {
            client_id: TEST_CLIENT_ID.to_string(),
            client_secret: TEST_CLIENT_SECRET.to_string(),
            auth_url: format!("{}/oauth2/auth", self.base_url),
            token_url: format!("{}/oauth2/token", self.base_url),
            userinfo_url: format!("{}/oauth2/userinfo", self.base_url),
        }
    }

    /// Provider context built through the same environment lookup the server uses
    pub fn context(&self) -> ProviderContext {
        let vars: HashMap<&str, String> = HashMap::from([
            ("CLIENT_ID", TEST_CLIENT_ID.to_string()),
            ("CLIENT_SECRET", TEST_CLIENT_SECRET.to_string()),
            ("REDIRECT_URI", TEST_REDIRECT_URI.to_string()),
            ("OAUTH2_AUTH_URL", format!("{}/oauth2/auth", self.base_url)),
            ("OAUTH2_TOKEN_URL", format!("{}/oauth2/token", self.base_url)),
            (
                "OAUTH2_USERINFO_URL",
                format!("{}/oauth2/userinfo", self.base_url),
            ),
        ]);
        ProviderContext::from_lookup(|key| vars.get(key).cloned())
            .expect("Mock provider context should build")
    }

    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.state.token_requests.lock().unwrap().clone()
    }

    pub fn fail_userinfo_with(&self, status: StatusCode) {
        *self.state.userinfo_status.lock().unwrap() = Some(status);
    }

    pub fn userinfo_body(&self, body: &str) {
        *self.state.userinfo_body.lock().unwrap() = Some(body.to_string());
    }
}

async fn token(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.hits.lock().unwrap().push("token".to_string());
    state.token_requests.lock().unwrap().push(form.clone());

    let field = |name: &str| form.get(name).map(String::as_str);
    if field("client_id") != Some(TEST_CLIENT_ID)
        || field("client_secret") != Some(TEST_CLIENT_SECRET)
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_client"})),
        )
            .into_response();
    }

    if field("grant_type") != Some("authorization_code") || field("code") != Some(VALID_CODE) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant"})),
        )
            .into_response();
    }

    Json(json!({
        "access_token": ISSUED_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3599,
        "scope": "profile email"
    }))
    .into_response()
}

async fn userinfo(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.hits.lock().unwrap().push("userinfo".to_string());

    if let Some(status) = *state.userinfo_status.lock().unwrap() {
        return (status, "forced failure").into_response();
    }

    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ISSUED_TOKEN}"));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    }

    if let Some(body) = state.userinfo_body.lock().unwrap().clone() {
        return body.into_response();
    }

    Json(json!({
        "id": "u1",
        "email": "a@example.com",
        "verified_email": true,
        "picture": "http://x/p.png"
    }))
    .into_response()
}
