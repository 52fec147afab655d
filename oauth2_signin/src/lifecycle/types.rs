use crate::session::PageSession;

/// Where a page session stands in the sign-in flow
///
/// `PendingExchange` and `ExpiredByInactivity` only exist while a page load is
/// being evaluated; an outcome always ends in `Unauthenticated` or `Authenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unauthenticated,
    PendingExchange,
    Authenticated,
    ExpiredByInactivity,
}

impl LifecycleState {
    pub(crate) fn of(session: &PageSession) -> Self {
        if session.is_authenticated() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

/// Message shown above the page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A provider call failed; the visitor has to start the login again
    Error(String),
    /// Informational, not a failure
    InactivityLogout,
    NotConfigured,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::Error(msg) => format!("Error during authentication: {msg}"),
            Self::InactivityLogout => "You have been logged out due to inactivity.".to_string(),
            Self::NotConfigured => {
                "OAuth client not initialized. Check your CLIENT_ID and CLIENT_SECRET.".to_string()
            }
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::InactivityLogout)
    }
}

/// Toggle values captured from the dashboard; `None` leaves a flag unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceUpdate {
    pub show_user_id: Option<bool>,
    pub show_email: Option<bool>,
    pub show_picture: Option<bool>,
    pub show_login_time: Option<bool>,
    pub stay_logged_in: Option<bool>,
}

impl PreferenceUpdate {
    pub(crate) fn apply(&self, session: &mut PageSession) {
        let display = &mut session.display;
        if let Some(v) = self.show_user_id {
            display.show_user_id = v;
        }
        if let Some(v) = self.show_email {
            display.show_email = v;
        }
        if let Some(v) = self.show_picture {
            display.show_picture = v;
        }
        if let Some(v) = self.show_login_time {
            display.show_login_time = v;
        }
        if let Some(v) = self.stay_logged_in {
            session.stay_logged_in = v;
        }
    }
}

/// Inputs of one page load
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Authorization code from the redirect back
    pub code: Option<String>,
    /// `error` parameter the provider sends when consent was not given
    pub provider_error: Option<String>,
    pub logout: bool,
    pub preferences: Option<PreferenceUpdate>,
}

/// Result of evaluating one page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    pub state: LifecycleState,
    pub notice: Option<Notice>,
    /// Present whenever the visitor can start a login
    pub authorization_url: Option<String>,
    /// The incoming code was exchanged and the session is now authenticated
    pub completed_login: bool,
}
