//! Resolved style cache
//!
//! Entries are keyed by snapshot revision, schema id and normalized
//! selections. A new snapshot has a new revision, so theme or override
//! changes can never serve a stale style.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use lru::LruCache;
use strata_tokens::TokenSnapshot;

use crate::compose::{compose, ResolvedStyle};
use crate::schema::VariantSchema;
use crate::selection::Selections;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct StyleKey {
    revision: u64,
    schema: u64,
    selections: Vec<(String, String)>,
}

/// Hit/miss counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

/// Bounded LRU cache of resolved styles
pub struct StyleCache {
    entries: Mutex<LruCache<StyleKey, Arc<ResolvedStyle>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StyleCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Compose and resolve, or return the cached result
    pub fn get_or_compose(
        &self,
        snapshot: &TokenSnapshot,
        schema: &VariantSchema,
        selections: &Selections,
    ) -> Arc<ResolvedStyle> {
        let key = StyleKey {
            revision: snapshot.revision(),
            schema: schema.id(),
            selections: selections.normalized(),
        };

        if let Some(style) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(style);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        // Composed outside the lock; a racing thread may compose the same key.
        let style = Arc::new(compose(schema, selections).resolve(snapshot.tokens()));
        self.lock().put(key, Arc::clone(&style));
        tracing::trace!(
            "StyleCache::get_or_compose - cached {} at revision {}",
            schema.name(),
            snapshot.revision()
        );
        style
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.lock().len(),
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
        tracing::debug!("StyleCache::clear - dropped all entries");
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<StyleKey, Arc<ResolvedStyle>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl std::fmt::Debug for StyleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleCache").field("stats", &self.stats()).finish()
    }
}
