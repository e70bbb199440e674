/// Options when creating a [`crate::RegistryClient`].
#[derive(Clone, Debug)]
pub struct Options {
    /// The maximum number of query cells whose registered cells are cached.
    pub(crate) cell_cache_items: usize,
    /// The maximum number of query cells whose per-quadrant counts are cached.
    pub(crate) quad_cache_items: usize,
    /// Whether registering a parcel also drops cached quadrant counts.
    pub(crate) invalidate_quads_on_register: bool,
}

impl Options {
    /// Create a new `Options` instance with the default values.
    pub fn new() -> Self {
        Self {
            cell_cache_items: 1024,
            quad_cache_items: 4096,
            invalidate_quads_on_register: true,
        }
    }

    /// Set the maximum number of cached registered-cell lookups.
    ///
    /// Zero disables the cache.
    ///
    /// Default: 1024.
    pub fn cell_cache_items(&mut self, cell_cache_items: usize) {
        self.cell_cache_items = cell_cache_items;
    }

    /// Set the maximum number of cached quadrant-count lookups.
    ///
    /// Zero disables the cache.
    ///
    /// Default: 4096.
    pub fn quad_cache_items(&mut self, quad_cache_items: usize) {
        self.quad_cache_items = quad_cache_items;
    }

    /// Set whether a successful registration drops cached quadrant counts as well as cached
    /// registered cells.
    ///
    /// Registered cells are always dropped, since any of them may now be stale. Counts are stale
    /// too, but callers which only use them as a coarse overview may prefer to keep them.
    ///
    /// Default: `true`.
    pub fn invalidate_quads_on_register(&mut self, invalidate: bool) {
        self.invalidate_quads_on_register = invalidate;
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
