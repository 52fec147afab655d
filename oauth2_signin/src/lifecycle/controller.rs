use chrono::{DateTime, Utc};

use crate::oauth2::{DEFAULT_SCOPES, OAuth2Error, ProviderContext, UserInfo};
use crate::session::PageSession;

use super::types::{LifecycleState, Notice, PageOutcome, PageRequest};

/// Evaluate one page load against the visitor's session
///
/// Decides between showing the login prompt, completing a pending code
/// exchange, showing the authenticated view, processing a logout, or
/// expiring an idle session. Provider failures are turned into a
/// [`Notice::Error`] and leave the session untouched.
pub async fn evaluate_page_load(
    provider: Option<&ProviderContext>,
    session: &mut PageSession,
    request: PageRequest,
    now: DateTime<Utc>,
) -> PageOutcome {
    let Some(context) = provider else {
        tracing::debug!("No OAuth2 client configured");
        return PageOutcome {
            state: LifecycleState::of(session),
            notice: Some(Notice::NotConfigured),
            authorization_url: None,
            completed_login: false,
        };
    };

    if session.is_authenticated() {
        if request.logout {
            session.sign_out();
            tracing::info!("User logged out");
            return login_prompt(context, None);
        }

        if session.is_idle_expired(now) {
            transition(LifecycleState::Authenticated, LifecycleState::ExpiredByInactivity);
            session.sign_out();
            tracing::warn!("Session expired after inactivity, user logged out");
            return login_prompt(context, Some(Notice::InactivityLogout));
        }

        if let Some(update) = request.preferences {
            tracing::debug!("Applying display preferences: {:?}", update);
            update.apply(session);
        }

        return PageOutcome {
            state: LifecycleState::Authenticated,
            notice: None,
            authorization_url: None,
            completed_login: false,
        };
    }

    if let Some(error) = request.provider_error {
        tracing::warn!("Identity provider returned error: {}", error);
        return login_prompt(context, Some(Notice::Error(error)));
    }

    let Some(code) = request.code.filter(|c| !c.is_empty()) else {
        return login_prompt(context, None);
    };

    transition(LifecycleState::Unauthenticated, LifecycleState::PendingExchange);
    match exchange_code_for_profile(context, &context.redirect_uri, &code).await {
        Ok(user_info) => {
            tracing::info!("User {} authenticated", user_info.email);
            session.sign_in(user_info, now);
            transition(LifecycleState::PendingExchange, LifecycleState::Authenticated);
            PageOutcome {
                state: LifecycleState::Authenticated,
                notice: None,
                authorization_url: None,
                completed_login: true,
            }
        }
        Err(e) => {
            tracing::error!("Error during authentication: {}", e);
            transition(LifecycleState::PendingExchange, LifecycleState::Unauthenticated);
            login_prompt(context, Some(Notice::Error(e.to_string())))
        }
    }
}

/// Token exchange followed by the profile fetch; the fetch never runs if the exchange failed
pub(super) async fn exchange_code_for_profile(
    context: &ProviderContext,
    redirect_uri: &str,
    code: &str,
) -> Result<UserInfo, OAuth2Error> {
    let token = context
        .provider
        .exchange_code_for_token(redirect_uri, code)
        .await?;
    context.provider.fetch_user_info(&token.access_token).await
}

fn login_prompt(context: &ProviderContext, notice: Option<Notice>) -> PageOutcome {
    let (authorization_url, notice) = match context
        .provider
        .authorization_url(&context.redirect_uri, DEFAULT_SCOPES)
    {
        Ok(url) => (Some(url), notice),
        Err(e) => {
            tracing::error!("Failed to build authorization URL: {}", e);
            (None, notice.or(Some(Notice::Error(e.to_string()))))
        }
    };

    PageOutcome {
        state: LifecycleState::Unauthenticated,
        notice,
        authorization_url,
        completed_login: false,
    }
}

fn transition(from: LifecycleState, to: LifecycleState) {
    tracing::debug!("Page session {:?} -> {:?}", from, to);
}
