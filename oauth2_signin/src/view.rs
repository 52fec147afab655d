//! Declarative description of what the page shows
//!
//! Built from the session and the outcome of the page load; renderers only
//! turn it into markup and never consult the session themselves.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::lifecycle::{Notice, PageOutcome};
use crate::session::{DisplayPreferences, PageSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    NotConfigured,
    Login(LoginView),
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub authorization_url: Option<String>,
    pub notice: Option<Notice>,
}

/// Authenticated view; each profile field is `Some` only when its toggle is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub picture_url: Option<String>,
    pub email: Option<String>,
    pub login_time: Option<String>,
    pub user_id: Option<String>,
    pub stay_logged_in: bool,
    pub preferences: DisplayPreferences,
    pub notice: Option<Notice>,
}

impl PageView {
    pub fn from_session(session: &PageSession, outcome: &PageOutcome, timezone: &str) -> Self {
        if outcome.notice == Some(Notice::NotConfigured) {
            return Self::NotConfigured;
        }

        if !session.is_authenticated() {
            return Self::Login(LoginView {
                authorization_url: outcome.authorization_url.clone(),
                notice: outcome.notice.clone(),
            });
        }

        let prefs = session.display;
        let shown = |on: bool, value: &str| on.then(|| value.to_string());

        Self::Dashboard(DashboardView {
            picture_url: shown(prefs.show_picture, session.picture_url()),
            email: shown(prefs.show_email, session.email()),
            login_time: session
                .last_login_time()
                .filter(|_| prefs.show_login_time)
                .map(|t| format_login_time(&t, timezone)),
            user_id: shown(prefs.show_user_id, session.user_id()),
            stay_logged_in: session.stay_logged_in,
            preferences: prefs,
            notice: outcome.notice.clone(),
        })
    }
}

static TIMEZONE_MAP: LazyLock<HashMap<&'static str, Tz>> = LazyLock::new(|| {
    HashMap::from([
        ("JST", Tz::Asia__Tokyo),
        ("EST", Tz::America__New_York),
        ("CST", Tz::America__Chicago),
        ("MST", Tz::America__Denver),
        ("PST", Tz::America__Los_Angeles),
        ("CET", Tz::Europe__Paris),
        ("EET", Tz::Europe__Helsinki),
        ("UTC", Tz::UTC),
    ])
});

/// Format a login time as `YYYY-MM-DD HH:MM:SS` in the named timezone
///
/// Unknown names fall back to UTC; IANA names such as `Asia/Tokyo` are accepted too.
pub fn format_login_time(time: &DateTime<Utc>, timezone_name: &str) -> String {
    let timezone = TIMEZONE_MAP
        .get(timezone_name)
        .copied()
        .or_else(|| timezone_name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC);

    time.with_timezone(&timezone)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
