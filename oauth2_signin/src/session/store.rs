use http::header::HeaderMap;

use crate::storage::{CacheData, GENERIC_CACHE_STORE};
use crate::utils::{gen_random_string, header_set_session_cookie};

use super::config::{SESSION_COOKIE_NAME, SESSION_STORE_TTL};
use super::errors::SessionError;
use super::types::PageSession;

const SESSION_PREFIX: &str = "page_session";

/// A page session together with the id it is stored under
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub session_id: String,
    pub session: PageSession,
}

/// Load the page session for `session_id`, creating a fresh one when the id is
/// missing or unknown
///
/// # Returns
/// * The loaded session and, when a new session was created, the headers
///   carrying its `Set-Cookie`
pub async fn load_or_create_session(
    session_id: Option<&str>,
) -> Result<(LoadedSession, Option<HeaderMap>), SessionError> {
    if let Some(session_id) = session_id {
        let cached = GENERIC_CACHE_STORE
            .lock()
            .await
            .get(SESSION_PREFIX, session_id)
            .await?;

        if let Some(cached) = cached {
            match PageSession::try_from(cached) {
                Ok(session) => {
                    return Ok((
                        LoadedSession {
                            session_id: session_id.to_string(),
                            session,
                        },
                        None,
                    ));
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable page session: {}", e);
                }
            }
        } else {
            tracing::debug!("No page session found for cookie, creating a new one");
        }
    }

    let session_id = gen_random_string(32)?;
    let session = PageSession::default();
    save_session(&session_id, &session).await?;

    let mut headers = HeaderMap::new();
    header_set_session_cookie(&mut headers, SESSION_COOKIE_NAME.as_str(), &session_id)?;

    tracing::debug!("Created new page session");
    Ok((
        LoadedSession {
            session_id,
            session,
        },
        Some(headers),
    ))
}

/// Persist `session` under `session_id`, refreshing its TTL
pub async fn save_session(session_id: &str, session: &PageSession) -> Result<(), SessionError> {
    let data = CacheData::try_from(session)?;
    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl(SESSION_PREFIX, session_id, data, *SESSION_STORE_TTL as usize)
        .await?;
    Ok(())
}

pub async fn remove_session(session_id: &str) -> Result<(), SessionError> {
    GENERIC_CACHE_STORE
        .lock()
        .await
        .remove(SESSION_PREFIX, session_id)
        .await?;
    Ok(())
}
