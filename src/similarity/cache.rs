//! LRU retention layer for nearest tables.
//!
//! Tables are published as `Arc`s only after they are fully built, so a
//! reader either sees a complete table or none at all. With a capacity equal
//! to the number of secrets nothing is ever evicted.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use super::ranker::NearestTable;

/// Cache statistics for monitoring and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe puzzle index -> nearest table map.
pub struct TableCache {
    tables: Mutex<LruCache<usize, Arc<NearestTable>>>,
    stats: Mutex<CacheStats>,
}

impl TableCache {
    /// Create a cache holding at most `capacity` tables (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tables: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Fetch a table, marking it most recently used.
    pub fn get(&self, puzzle: usize) -> Option<Arc<NearestTable>> {
        let found = self.tables.lock().get(&puzzle).cloned();
        let mut stats = self.stats.lock();
        if found.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        found
    }

    /// Publish a table, replacing any table for the same puzzle.
    ///
    /// Returns the puzzle index that was evicted to make room, if any.
    pub fn publish(&self, table: Arc<NearestTable>) -> Option<usize> {
        let puzzle = table.puzzle();
        let displaced = self.tables.lock().push(puzzle, table);
        match displaced {
            Some((evicted, _)) if evicted != puzzle => {
                self.stats.lock().evictions += 1;
                debug!(puzzle = evicted, "evicted nearest table");
                Some(evicted)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn contains(&self, puzzle: usize) -> bool {
        self.tables.lock().contains(&puzzle)
    }

    /// Resident puzzle indices, ascending.
    #[must_use]
    pub fn puzzles(&self) -> Vec<usize> {
        let mut puzzles: Vec<usize> = self.tables.lock().iter().map(|(&k, _)| k).collect();
        puzzles.sort_unstable();
        puzzles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tables.lock().cap().get()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        *self.stats.lock()
    }
}
