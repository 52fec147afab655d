use std::sync::LazyLock;
use tokio::sync::Mutex;

use super::memory::InMemoryCacheStore;
use super::types::CacheStore;

/// Process-wide store holding every visitor's page session
pub(crate) static GENERIC_CACHE_STORE: LazyLock<Mutex<Box<dyn CacheStore>>> =
    LazyLock::new(|| {
        tracing::info!("Initializing in-memory page session store");
        Mutex::new(Box::new(InMemoryCacheStore::new()))
    });
