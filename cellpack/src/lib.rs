//! Querying and registering land parcels described as sets of quad-tree cells.
//!
//! Cells travel to the registry contract in the packed form defined by [`cellpack_core`]. The
//! [`RegistryClient`] wraps a [`Registry`] implementation with an explicit cache of lookups, so
//! repeated map views of the same area do not repeat contract calls.

use anyhow::Context as _;

pub use cellpack_core::{
    decode_set, decode_single, encode_set, encode_single, pack, segment, CellId, ChildPosition,
    FormatError, PackError,
};

pub use cache::RegistrationCache;
pub use options::Options;
pub use registry::{MemoryRegistry, Registry};

mod cache;
mod options;
mod registry;

#[cfg(feature = "benchmarks")]
pub mod benches;

/// A client of a land registry, caching lookups per queried cell.
pub struct RegistryClient<R> {
    registry: R,
    cache: RegistrationCache,
    options: Options,
}

impl<R: Registry> RegistryClient<R> {
    /// Create a new client over the given registry.
    pub fn new(registry: R, options: Options) -> Self {
        RegistryClient {
            registry,
            cache: RegistrationCache::new(&options),
            options,
        }
    }

    /// The wrapped registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// The lookup cache.
    pub fn cache(&self) -> &RegistrationCache {
        &self.cache
    }

    /// Mutable access to the lookup cache, e.g. for invalidation after an out-of-band
    /// registration.
    pub fn cache_mut(&mut self) -> &mut RegistrationCache {
        &mut self.cache
    }

    /// The registered cells lying within the cell named by `token`, ascending.
    pub fn registered_in(&mut self, token: &str) -> anyhow::Result<Vec<CellId>> {
        let cell = parse(token)?;
        if let Some(cells) = self.cache.registered_cells(cell) {
            tracing::trace!(%cell, "registered cells cache hit");
            return Ok(cells.to_vec());
        }

        let packed = pack::to_hex(&pack::pack_cell(cell));
        tracing::debug!(%cell, %packed, "querying registered cells");
        let values = self
            .registry
            .registered_cells(&packed)
            .with_context(|| format!("registry lookup for cell {cell} failed"))?;

        let mut cells = values
            .iter()
            .map(|v| CellId::from_contract_value(v))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("registry returned a malformed cell for {cell}"))?;
        cells.sort_unstable();

        self.cache.insert_registered_cells(cell, cells.clone());
        Ok(cells)
    }

    /// The number of registered cells within each quadrant of each cell, in input order.
    ///
    /// Leaf cells have no quadrants, so asking about one is an error.
    pub fn quadrant_counts<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
    ) -> anyhow::Result<Vec<[u64; 4]>> {
        tokens
            .iter()
            .map(|token| self.quad_counts(parse(token.as_ref())?))
            .collect()
    }

    /// The child cells of the given cells which hold at least one registered cell.
    ///
    /// Leaf cells are skipped without querying the registry.
    pub fn occupied_quadrants<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
    ) -> anyhow::Result<Vec<CellId>> {
        let mut occupied = Vec::new();
        for token in tokens {
            let cell = parse(token.as_ref())?;
            let Some(children) = cell.children() else {
                continue;
            };
            let counts = self.quad_counts(cell)?;
            occupied.extend(
                children
                    .into_iter()
                    .zip(counts)
                    .filter(|(_, count)| *count > 0)
                    .map(|(child, _)| child),
            );
        }
        Ok(occupied)
    }

    /// Register a parcel made of the given cells. Returns the packed payload that was sent.
    ///
    /// On success cached lookups are invalidated according to the [`Options`].
    pub fn register<S: AsRef<str>>(&mut self, tokens: &[S]) -> anyhow::Result<String> {
        let packed = encode_set(tokens).context("failed to pack parcel cells")?;
        tracing::debug!(cells = tokens.len(), bytes = (packed.len() - 2) / 2, "registering parcel");
        self.registry
            .register(&packed)
            .context("parcel registration failed")?;

        self.cache.invalidate_cells();
        if self.options.invalidate_quads_on_register {
            self.cache.invalidate_quads();
        }
        tracing::info!(%packed, "parcel registered, cache invalidated");
        Ok(packed)
    }

    fn quad_counts(&mut self, cell: CellId) -> anyhow::Result<[u64; 4]> {
        if let Some(counts) = self.cache.quad_counts(cell) {
            tracing::trace!(%cell, "quadrant counts cache hit");
            return Ok(counts);
        }
        if cell.is_leaf() {
            anyhow::bail!("leaf cell {cell} has no quadrants");
        }

        let packed = pack::to_hex(&pack::pack_cell(cell));
        tracing::debug!(%cell, %packed, "querying quadrant counts");
        let counts = self
            .registry
            .registered_cells_per_quad(&packed)
            .with_context(|| format!("registry quadrant lookup for {cell} failed"))?;
        self.cache.insert_quad_counts(cell, counts);
        Ok(counts)
    }
}

fn parse(token: &str) -> anyhow::Result<CellId> {
    token
        .parse::<CellId>()
        .with_context(|| format!("invalid cell token {token:?}"))
}
