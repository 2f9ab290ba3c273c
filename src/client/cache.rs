use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// The read queries of the catalog. Cache entries are grouped by family so a
/// mutation can drop everything it may have made stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryFamily {
    Authors,
    Books,
    AuthorDetails,
    BookReviews,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve from the cache when the same query and variables were fetched before.
    #[default]
    CacheFirst,
    /// Always go to the server, then overwrite the cached entry.
    NetworkOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub family: QueryFamily,
    pub document: String,
    pub variables: String,
}

type Entry = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
pub(crate) struct QueryCache {
    entries: Mutex<HashMap<CacheKey, Entry>>,
}

impl QueryCache {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get<T: Clone + 'static>(&self, key: &CacheKey) -> Option<T> {
        self.entries()
            .get(key)
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }

    pub fn insert<T: Send + Sync + 'static>(&self, key: CacheKey, value: T) {
        self.entries().insert(key, Arc::new(value));
    }

    /// Drops every entry of `family`, returning how many were removed.
    pub fn evict(&self, family: QueryFamily) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, _| key.family != family);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }
}
