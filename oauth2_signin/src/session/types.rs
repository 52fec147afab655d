use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::oauth2::UserInfo;
use crate::storage::{CacheData, StorageError};

use super::config::INACTIVITY_TIMEOUT;

/// Which profile fields the dashboard shows
///
/// Rendering only; none of these affect authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    pub show_user_id: bool,
    pub show_email: bool,
    pub show_picture: bool,
    pub show_login_time: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            show_user_id: true,
            show_email: true,
            show_picture: true,
            show_login_time: true,
        }
    }
}

/// Per-visitor state held for the duration of one browsing session
///
/// `authenticated` is true exactly when `last_login_time` is set and the three
/// profile fields are non-empty. Only [`PageSession::sign_in`] and
/// [`PageSession::sign_out`] touch those fields, which keeps them in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSession {
    authenticated: bool,
    user_id: String,
    email: String,
    picture_url: String,
    last_login_time: Option<DateTime<Utc>>,
    pub stay_logged_in: bool,
    pub display: DisplayPreferences,
}

impl Default for PageSession {
    fn default() -> Self {
        Self {
            authenticated: false,
            user_id: String::new(),
            email: String::new(),
            picture_url: String::new(),
            last_login_time: None,
            stay_logged_in: true,
            display: DisplayPreferences::default(),
        }
    }
}

impl PageSession {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn picture_url(&self) -> &str {
        &self.picture_url
    }

    pub fn last_login_time(&self) -> Option<DateTime<Utc>> {
        self.last_login_time
    }

    /// Copy the profile in and mark the session authenticated as of `now`
    pub(crate) fn sign_in(&mut self, user_info: UserInfo, now: DateTime<Utc>) {
        self.user_id = user_info.id;
        self.email = user_info.email;
        self.picture_url = user_info.picture;
        self.last_login_time = Some(now);
        self.authenticated = true;
    }

    /// Clear the profile and login time. Preferences are kept.
    pub(crate) fn sign_out(&mut self) {
        self.user_id.clear();
        self.email.clear();
        self.picture_url.clear();
        self.last_login_time = None;
        self.authenticated = false;
    }

    /// True when more than [`INACTIVITY_TIMEOUT`] has passed since login.
    ///
    /// Measured from login, not from the last request.
    pub fn is_idle_expired(&self, now: DateTime<Utc>) -> bool {
        match self.last_login_time {
            Some(login) => now - login > INACTIVITY_TIMEOUT,
            None => false,
        }
    }

    pub fn is_consistent(&self) -> bool {
        let profile_set = !self.user_id.is_empty()
            && !self.email.is_empty()
            && !self.picture_url.is_empty()
            && self.last_login_time.is_some();
        let profile_clear = self.user_id.is_empty()
            && self.email.is_empty()
            && self.picture_url.is_empty()
            && self.last_login_time.is_none();

        if self.authenticated {
            profile_set
        } else {
            profile_clear
        }
    }
}

impl TryFrom<&PageSession> for CacheData {
    type Error = StorageError;

    fn try_from(session: &PageSession) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(session)?,
        })
    }
}

impl TryFrom<CacheData> for PageSession {
    type Error = StorageError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        Ok(serde_json::from_str(&data.value)?)
    }
}
