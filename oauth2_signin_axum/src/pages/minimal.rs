use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;

use oauth2_signin::{MinimalOutcome, Notice, O2S_ROUTE_PREFIX, evaluate_minimal};

use crate::config::O2S_PROVIDER_NAME;
use crate::router::SigninState;

#[derive(Template)]
#[template(path = "minimal.j2", escape = "html")]
struct MinimalTemplate<'a> {
    title: &'a str,
    o2s_route_prefix: &'a str,
    provider_name: &'a str,
    authorization_url: Option<String>,
    email: Option<String>,
    error: Option<String>,
}

impl<'a> MinimalTemplate<'a> {
    fn new(outcome: MinimalOutcome) -> Self {
        let mut template = Self {
            title: "Google OAuth Login",
            o2s_route_prefix: O2S_ROUTE_PREFIX.as_str(),
            provider_name: O2S_PROVIDER_NAME.as_str(),
            authorization_url: None,
            email: None,
            error: None,
        };
        match outcome {
            MinimalOutcome::NotConfigured => {
                template.error = Some(Notice::NotConfigured.message());
            }
            MinimalOutcome::Login { authorization_url } => {
                template.authorization_url = Some(authorization_url);
            }
            MinimalOutcome::Authenticated { email } => template.email = Some(email),
            MinimalOutcome::Error { message } => template.error = Some(message),
        }
        template
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MinimalQuery {
    code: Option<String>,
}

/// Stateless page: login link, or the email of whoever just came back with a code
pub(super) async fn minimal(
    State(state): State<SigninState>,
    Query(query): Query<MinimalQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    let outcome = evaluate_minimal(state.provider.as_ref(), query.code.as_deref()).await;

    MinimalTemplate::new(outcome)
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
