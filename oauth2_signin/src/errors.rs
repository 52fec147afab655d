//! Error types for the sign-in core

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`crate::init`]
///
/// Provider failures during a page load never surface here; the lifecycle
/// controller turns them into a displayed notice, and a missing OAuth2
/// configuration only disables the page. What remains is the session store.
#[derive(Error, Debug)]
pub enum SigninError {
    /// Error from the cache store
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<StorageError> for SigninError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage error: {}", err);
        Self::StorageError(err.to_string())
    }
}
