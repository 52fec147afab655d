use crate::oauth2::{DEFAULT_SCOPES, ProviderContext};

use super::controller::exchange_code_for_profile;

/// What the stateless minimal page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimalOutcome {
    NotConfigured,
    Login { authorization_url: String },
    Authenticated { email: String },
    Error { message: String },
}

/// Stateless variant of the page: complete the code exchange and report the email
///
/// Nothing is stored; every load starts from scratch.
pub async fn evaluate_minimal(
    provider: Option<&ProviderContext>,
    code: Option<&str>,
) -> MinimalOutcome {
    let Some(context) = provider else {
        return MinimalOutcome::NotConfigured;
    };

    match code.filter(|c| !c.is_empty()) {
        Some(code) => {
            match exchange_code_for_profile(context, &context.minimal_redirect_uri, code).await {
                Ok(user_info) => MinimalOutcome::Authenticated {
                    email: user_info.email,
                },
                Err(e) => {
                    tracing::error!("Error during authentication: {}", e);
                    MinimalOutcome::Error {
                        message: format!("Error during authentication: {e}"),
                    }
                }
            }
        }
        None => match context
            .provider
            .authorization_url(&context.minimal_redirect_uri, DEFAULT_SCOPES)
        {
            Ok(authorization_url) => MinimalOutcome::Login { authorization_url },
            Err(e) => MinimalOutcome::Error {
                message: format!("Error during authentication: {e}"),
            },
        },
    }
}
