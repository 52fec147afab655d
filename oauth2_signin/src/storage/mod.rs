mod config;
mod errors;
mod memory;
mod types;

pub(crate) use config::GENERIC_CACHE_STORE;
pub(crate) use errors::StorageError;
pub(crate) use types::CacheData;

pub(crate) async fn init() -> Result<(), StorageError> {
    GENERIC_CACHE_STORE.lock().await.init().await
}
