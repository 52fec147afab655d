mod config;
mod errors;
mod store;
mod types;

pub use config::{INACTIVITY_TIMEOUT, SESSION_COOKIE_NAME};
pub use errors::SessionError;
pub use store::{LoadedSession, load_or_create_session, remove_session, save_session};
pub use types::{DisplayPreferences, PageSession};
