#![cfg(feature = "benchmarks")]

use cellpack_core::{
    pack::{pack_cells, unpack_cells},
    CellId, ChildPosition,
};
use criterion::{BenchmarkId, Criterion};

pub fn codec_benchmark(c: &mut Criterion) {
    pack_benchmark(c);
    unpack_benchmark(c);
}

// returns `n` distinct cells at level 24 under a single level-12 ancestor, like the covering of
// a small parcel.
pub fn get_parcel(n: usize) -> Vec<CellId> {
    use rand::{Rng as _, SeedableRng as _};

    let mut rng = rand_pcg::Lcg64Xsh32::from_seed([n as u8; 16]);
    let mut ancestor = CellId::from_face(rng.gen_range(0..6)).unwrap();
    for _ in 0..12 {
        ancestor = ancestor.child(random_position(&mut rng)).unwrap();
    }

    let mut cells = Vec::with_capacity(n);
    while cells.len() < n {
        let mut cell = ancestor;
        for _ in 0..12 {
            cell = cell.child(random_position(&mut rng)).unwrap();
        }
        if !cells.contains(&cell) {
            cells.push(cell);
        }
    }
    cells
}

fn random_position(rng: &mut impl rand::Rng) -> ChildPosition {
    // unwrap: always in range.
    ChildPosition::new(rng.gen_range(0..4)).unwrap()
}

pub fn pack_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_cells");

    for n in [1, 8, 64, 300] {
        let cells = get_parcel(n);
        group.bench_function(BenchmarkId::new("cells", n), |b| {
            b.iter(|| pack_cells(cells.iter().copied()).unwrap());
        });
    }

    group.finish();
}

pub fn unpack_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpack_cells");

    for n in [1, 8, 64, 300] {
        let packed = pack_cells(get_parcel(n)).unwrap();
        group.bench_function(BenchmarkId::new("cells", n), |b| {
            b.iter(|| unpack_cells(&packed).unwrap());
        });
    }

    group.finish();
}
