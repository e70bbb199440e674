//! The registry contract seam.
//!
//! Queries and registrations carry cells in their packed hex form. A query names one cell packed
//! with [`cellpack_core::encode_single`]; a registration carries a whole parcel packed with
//! [`cellpack_core::encode_set`].

use std::collections::BTreeSet;

use anyhow::{bail, Context as _};
use cellpack_core::{
    pack::{from_hex, unpack_cell, unpack_cells},
    CellId,
};

/// A land registry holding sets of registered cells.
pub trait Registry {
    /// The registered cells lying within the packed query cell, as contract integer values.
    fn registered_cells(&self, packed_cell: &str) -> anyhow::Result<Vec<String>>;

    /// The number of registered cells within each of the four children of the packed query cell.
    fn registered_cells_per_quad(&self, packed_cell: &str) -> anyhow::Result<[u64; 4]>;

    /// Register a parcel made of the packed set of cells.
    fn register(&mut self, packed_cells: &str) -> anyhow::Result<()>;
}

/// An in-process registry which decodes payloads the same way the contract does.
#[derive(Default)]
pub struct MemoryRegistry {
    cells: BTreeSet<CellId>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All registered cells, ascending.
    pub fn cells(&self) -> impl Iterator<Item = &CellId> + '_ {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn query_cell(packed_cell: &str) -> anyhow::Result<CellId> {
        let bytes = from_hex(packed_cell)?;
        unpack_cell(&bytes).with_context(|| format!("malformed packed cell {packed_cell}"))
    }

    fn count_within(&self, cell: &CellId) -> u64 {
        self.cells.iter().filter(|c| cell.contains(c)).count() as u64
    }
}

impl Registry for MemoryRegistry {
    fn registered_cells(&self, packed_cell: &str) -> anyhow::Result<Vec<String>> {
        let cell = Self::query_cell(packed_cell)?;
        Ok(self
            .cells
            .iter()
            .filter(|c| cell.contains(c))
            .map(|c| c.to_u64().to_string())
            .collect())
    }

    fn registered_cells_per_quad(&self, packed_cell: &str) -> anyhow::Result<[u64; 4]> {
        let cell = Self::query_cell(packed_cell)?;
        let Some(children) = cell.children() else {
            bail!("leaf cell {cell} has no quadrants");
        };
        Ok(children.map(|child| self.count_within(&child)))
    }

    fn register(&mut self, packed_cells: &str) -> anyhow::Result<()> {
        let bytes = from_hex(packed_cells)?;
        let parcel = unpack_cells(&bytes)
            .with_context(|| format!("malformed packed cell set {packed_cells}"))?;

        for cell in &parcel {
            if let Some(owned) = self
                .cells
                .iter()
                .find(|c| c.contains(cell) || cell.contains(c))
            {
                bail!("cell {cell} overlaps registered cell {owned}");
            }
        }

        self.cells.extend(parcel);
        Ok(())
    }
}
