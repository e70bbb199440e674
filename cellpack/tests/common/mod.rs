use cellpack::{CellId, ChildPosition, MemoryRegistry, Registry};
use std::cell::Cell;

/// Deterministic cells under the given ancestor, `depth` levels below it.
///
/// The returned cells are distinct but in no particular order.
#[allow(dead_code)]
pub fn parcel(seed: u64, ancestor: CellId, depth: u8, n: usize) -> Vec<CellId> {
    use rand::{Rng as _, SeedableRng as _};
    let mut s = [0; 16];
    s[0..8].copy_from_slice(&seed.to_le_bytes());
    let mut rng = rand_pcg::Lcg64Xsh32::from_seed(s);

    let mut cells: Vec<CellId> = Vec::with_capacity(n);
    while cells.len() < n {
        let mut cell = ancestor;
        for _ in 0..depth {
            let position = ChildPosition::new(rng.gen_range(0..4)).unwrap();
            cell = cell.child(position).unwrap();
        }
        if !cells.contains(&cell) {
            cells.push(cell);
        }
    }
    cells
}

pub fn cell(token: &str) -> CellId {
    token.parse().unwrap()
}

pub fn tokens(cells: &[CellId]) -> Vec<String> {
    cells.iter().map(CellId::to_token).collect()
}

/// A [`MemoryRegistry`] which counts the calls made against it.
#[derive(Default)]
pub struct CountingRegistry {
    pub inner: MemoryRegistry,
    cell_queries: Cell<usize>,
    quad_queries: Cell<usize>,
    registrations: usize,
}

#[allow(dead_code)]
impl CountingRegistry {
    pub fn cell_queries(&self) -> usize {
        self.cell_queries.get()
    }

    pub fn quad_queries(&self) -> usize {
        self.quad_queries.get()
    }

    pub fn registrations(&self) -> usize {
        self.registrations
    }
}

impl Registry for CountingRegistry {
    fn registered_cells(&self, packed_cell: &str) -> anyhow::Result<Vec<String>> {
        self.cell_queries.set(self.cell_queries.get() + 1);
        self.inner.registered_cells(packed_cell)
    }

    fn registered_cells_per_quad(&self, packed_cell: &str) -> anyhow::Result<[u64; 4]> {
        self.quad_queries.set(self.quad_queries.get() + 1);
        self.inner.registered_cells_per_quad(packed_cell)
    }

    fn register(&mut self, packed_cells: &str) -> anyhow::Result<()> {
        self.registrations += 1;
        self.inner.register(packed_cells)
    }
}
