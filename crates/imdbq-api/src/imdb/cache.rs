//! Pluggable response cache.

use std::collections::HashMap;
use std::sync::Mutex;

/// Cache consulted by [`ImdbClient`](super::ImdbClient) before each request.
///
/// Keys are full request URLs including the query string; values are raw
/// response bodies. Only successful responses are stored. Eviction and
/// expiry are up to the implementation.
pub trait ResponseCache: Send + Sync + std::fmt::Debug {
    /// Returns the cached body for `url`, if any.
    fn get(&self, url: &str) -> Option<String>;

    /// Stores a successful response body for `url`.
    fn put(&self, url: &str, body: &str);
}

/// Unbounded in-process cache.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct MemoryCache {
    /// Bodies keyed by URL.
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, url: &str) -> Option<String> {
        self.entries.lock().ok()?.get(url).cloned()
    }

    fn put(&self, url: &str, body: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(String::from(url), String::from(body));
        } else {
            tracing::warn!(url, "response cache lock poisoned, skipping store");
        }
    }
}
