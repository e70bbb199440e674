//! Caches of registry lookups, keyed by the queried cell.
//!
//! The cache is an explicit value owned by its user, with invalidation left to the caller. Each
//! kind of lookup is held in its own LRU with a maximum number of entries.

use cellpack_core::CellId;
use lru::LruCache;

use crate::options::Options;

/// Cached results of registry lookups.
pub struct RegistrationCache {
    cells: Shard<Vec<CellId>>,
    quads: Shard<[u64; 4]>,
}

impl RegistrationCache {
    /// Create a cache sized according to the options.
    pub fn new(options: &Options) -> Self {
        Self::with_capacity(options.cell_cache_items, options.quad_cache_items)
    }

    /// Create a cache holding at most the given number of entries of each kind.
    pub fn with_capacity(cell_items: usize, quad_items: usize) -> Self {
        RegistrationCache {
            cells: Shard::new(cell_items),
            quads: Shard::new(quad_items),
        }
    }

    /// Get the registered cells found within `cell`, updating the LRU state.
    pub fn registered_cells(&mut self, cell: CellId) -> Option<&[CellId]> {
        self.cells.cache.get(&cell).map(|cells| &cells[..])
    }

    /// Cache the registered cells found within `cell`.
    pub fn insert_registered_cells(&mut self, cell: CellId, registered: Vec<CellId>) {
        self.cells.insert(cell, registered);
    }

    /// Get the per-quadrant counts of registered cells within `cell`, updating the LRU state.
    pub fn quad_counts(&mut self, cell: CellId) -> Option<[u64; 4]> {
        self.quads.cache.get(&cell).copied()
    }

    /// Cache the per-quadrant counts of registered cells within `cell`.
    pub fn insert_quad_counts(&mut self, cell: CellId, counts: [u64; 4]) {
        self.quads.insert(cell, counts);
    }

    /// Drop all cached registered cells.
    pub fn invalidate_cells(&mut self) {
        self.cells.cache.clear();
    }

    /// Drop all cached quadrant counts.
    pub fn invalidate_quads(&mut self) {
        self.quads.cache.clear();
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.invalidate_cells();
        self.invalidate_quads();
    }

    /// The number of cached registered-cell lookups.
    pub fn cell_entries(&self) -> usize {
        self.cells.cache.len()
    }

    /// The number of cached quadrant-count lookups.
    pub fn quad_entries(&self) -> usize {
        self.quads.cache.len()
    }
}

struct Shard<V> {
    cache: LruCache<CellId, V>,
    max_items: usize,
}

impl<V> Shard<V> {
    fn new(max_items: usize) -> Self {
        Shard {
            cache: LruCache::unbounded(),
            max_items,
        }
    }

    // Insert an entry, then evict least recently used entries down to the limit.
    fn insert(&mut self, cell: CellId, value: V) {
        self.cache.put(cell, value);
        while self.cache.len() > self.max_items {
            let _ = self.cache.pop_lru();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(token: &str) -> CellId {
        token.parse().unwrap()
    }

    #[test]
    fn hit_after_insert() {
        let mut cache = RegistrationCache::with_capacity(4, 4);
        assert!(cache.registered_cells(cell("89c24")).is_none());

        cache.insert_registered_cells(cell("89c24"), vec![cell("89c25")]);
        assert_eq!(
            cache.registered_cells(cell("89c24")),
            Some(&[cell("89c25")][..])
        );

        cache.insert_quad_counts(cell("89c24"), [0, 1, 0, 0]);
        assert_eq!(cache.quad_counts(cell("89c24")), Some([0, 1, 0, 0]));
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = RegistrationCache::with_capacity(2, 2);
        cache.insert_quad_counts(cell("1"), [1, 0, 0, 0]);
        cache.insert_quad_counts(cell("3"), [2, 0, 0, 0]);

        // touch "1" so "3" is the eviction candidate.
        assert!(cache.quad_counts(cell("1")).is_some());
        cache.insert_quad_counts(cell("5"), [3, 0, 0, 0]);

        assert_eq!(cache.quad_entries(), 2);
        assert!(cache.quad_counts(cell("3")).is_none());
        assert!(cache.quad_counts(cell("1")).is_some());
        assert!(cache.quad_counts(cell("5")).is_some());
    }

    #[test]
    fn zero_capacity_caches_nothing() {
        let mut cache = RegistrationCache::with_capacity(0, 0);
        cache.insert_registered_cells(cell("1"), Vec::new());
        cache.insert_quad_counts(cell("1"), [0; 4]);
        assert_eq!(cache.cell_entries(), 0);
        assert_eq!(cache.quad_entries(), 0);
    }

    #[test]
    fn invalidation_is_per_kind() {
        let mut cache = RegistrationCache::new(&Options::new());
        cache.insert_registered_cells(cell("1"), Vec::new());
        cache.insert_quad_counts(cell("1"), [0; 4]);

        cache.invalidate_cells();
        assert_eq!(cache.cell_entries(), 0);
        assert_eq!(cache.quad_entries(), 1);

        cache.insert_registered_cells(cell("1"), Vec::new());
        cache.clear();
        assert_eq!(cache.cell_entries(), 0);
        assert_eq!(cache.quad_entries(), 0);
    }
}
