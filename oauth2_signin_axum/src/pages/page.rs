use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;

use oauth2_signin::{
    DashboardView, LoginView, Notice, O2S_DISPLAY_TIMEZONE, O2S_ROUTE_PREFIX, PageOutcome,
    PageRequest, PageSession, PageView, PreferenceUpdate, evaluate_page_load, save_session,
};

use crate::config::{O2S_PAGE_URL, O2S_PROVIDER_NAME};
use crate::error::IntoResponseError;
use crate::router::SigninState;
use crate::session::PageVisitor;

const PAGE_TITLE: &str = "SignUp";

#[derive(Template)]
#[template(path = "login.j2", escape = "html")]
struct LoginTemplate<'a> {
    title: &'a str,
    o2s_route_prefix: &'a str,
    provider_name: &'a str,
    authorization_url: Option<String>,
    notice: Option<String>,
    notice_is_error: bool,
}

#[derive(Template)]
#[template(path = "dashboard.j2", escape = "html")]
struct DashboardTemplate<'a> {
    title: &'a str,
    o2s_route_prefix: &'a str,
    picture_url: Option<String>,
    email: Option<String>,
    login_time: Option<String>,
    user_id: Option<String>,
    stay_logged_in: bool,
    show_user_id: bool,
    show_email: bool,
    show_picture: bool,
    show_login_time: bool,
    notice: Option<String>,
    notice_is_error: bool,
}

#[derive(Template)]
#[template(path = "not_configured.j2", escape = "html")]
struct NotConfiguredTemplate<'a> {
    title: &'a str,
    o2s_route_prefix: &'a str,
    message: String,
}

fn notice_parts(notice: Option<&Notice>) -> (Option<String>, bool) {
    match notice {
        Some(notice) => (Some(notice.message()), notice.is_error()),
        None => (None, false),
    }
}

/// Render the declarative page view to HTML
fn render_view(view: PageView) -> Result<Html<String>, (StatusCode, String)> {
    let prefix = O2S_ROUTE_PREFIX.as_str();
    let rendered = match view {
        PageView::NotConfigured => NotConfiguredTemplate {
            title: PAGE_TITLE,
            o2s_route_prefix: prefix,
            message: Notice::NotConfigured.message(),
        }
        .render(),
        PageView::Login(LoginView {
            authorization_url,
            notice,
        }) => {
            let (notice, notice_is_error) = notice_parts(notice.as_ref());
            LoginTemplate {
                title: PAGE_TITLE,
                o2s_route_prefix: prefix,
                provider_name: O2S_PROVIDER_NAME.as_str(),
                authorization_url,
                notice,
                notice_is_error,
            }
            .render()
        }
        PageView::Dashboard(DashboardView {
            picture_url,
            email,
            login_time,
            user_id,
            stay_logged_in,
            preferences,
            notice,
        }) => {
            let (notice, notice_is_error) = notice_parts(notice.as_ref());
            DashboardTemplate {
                title: PAGE_TITLE,
                o2s_route_prefix: prefix,
                picture_url,
                email,
                login_time,
                user_id,
                stay_logged_in,
                show_user_id: preferences.show_user_id,
                show_email: preferences.show_email,
                show_picture: preferences.show_picture,
                show_login_time: preferences.show_login_time,
                notice,
                notice_is_error,
            }
            .render()
        }
    };

    rendered
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

fn render_page(session: &PageSession, outcome: &PageOutcome) -> Result<Response, (StatusCode, String)> {
    let view = PageView::from_session(session, outcome, O2S_DISPLAY_TIMEZONE.as_str());
    Ok(render_view(view)?.into_response())
}

/// Evaluate `request` against the visitor's session and persist the result
async fn evaluate_and_save(
    state: &SigninState,
    visitor: &mut PageVisitor,
    request: PageRequest,
) -> Result<PageOutcome, (StatusCode, String)> {
    let outcome = evaluate_page_load(
        state.provider.as_ref(),
        &mut visitor.session,
        request,
        Utc::now(),
    )
    .await;

    save_session(&visitor.session_id, &visitor.session)
        .await
        .into_response_error()?;

    Ok(outcome)
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PageQuery {
    code: Option<String>,
    error: Option<String>,
}

pub(super) async fn page(
    State(state): State<SigninState>,
    mut visitor: PageVisitor,
    Query(query): Query<PageQuery>,
) -> Result<Response, (StatusCode, String)> {
    let request = PageRequest {
        code: query.code,
        provider_error: query.error,
        ..Default::default()
    };
    let outcome = evaluate_and_save(&state, &mut visitor, request).await?;

    let response = if outcome.completed_login {
        // Drop the code from the address bar so a reload does not replay it
        Redirect::to(O2S_PAGE_URL.as_str()).into_response()
    } else {
        render_page(&visitor.session, &outcome)?
    };

    Ok((visitor.cookie_headers(), response).into_response())
}

pub(super) async fn logout(
    State(state): State<SigninState>,
    mut visitor: PageVisitor,
) -> Result<Response, (StatusCode, String)> {
    let request = PageRequest {
        logout: true,
        ..Default::default()
    };
    evaluate_and_save(&state, &mut visitor, request).await?;

    Ok((
        visitor.cookie_headers(),
        Redirect::to(O2S_PAGE_URL.as_str()),
    )
        .into_response())
}

/// Checkbox form; an unchecked box is simply absent from the submission
#[derive(Debug, Default, Deserialize)]
pub(super) struct PreferencesForm {
    show_user_id: Option<String>,
    show_email: Option<String>,
    show_picture: Option<String>,
    show_login_time: Option<String>,
    stay_logged_in: Option<String>,
}

impl From<PreferencesForm> for PreferenceUpdate {
    fn from(form: PreferencesForm) -> Self {
        Self {
            show_user_id: Some(form.show_user_id.is_some()),
            show_email: Some(form.show_email.is_some()),
            show_picture: Some(form.show_picture.is_some()),
            show_login_time: Some(form.show_login_time.is_some()),
            stay_logged_in: Some(form.stay_logged_in.is_some()),
        }
    }
}

pub(super) async fn preferences(
    State(state): State<SigninState>,
    mut visitor: PageVisitor,
    Form(form): Form<PreferencesForm>,
) -> Result<Response, (StatusCode, String)> {
    let request = PageRequest {
        preferences: Some(form.into()),
        ..Default::default()
    };
    let outcome = evaluate_and_save(&state, &mut visitor, request).await?;

    // A notice would be lost across a redirect, so show it right away
    let response = if outcome.notice.is_some() {
        tracing::debug!("Preferences not applied: {:?}", outcome.notice);
        render_page(&visitor.session, &outcome)?
    } else {
        Redirect::to(O2S_PAGE_URL.as_str()).into_response()
    };

    Ok((visitor.cookie_headers(), response).into_response())
}

pub(super) async fn serve_signin_css() -> Response {
    let css_content = include_str!("../../static/signin.css");
    ([(CONTENT_TYPE, "text/css")], css_content).into_response()
}
