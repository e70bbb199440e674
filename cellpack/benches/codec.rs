#[cfg(feature = "benchmarks")]
use cellpack::benches::codec_benchmark;
#[cfg(feature = "benchmarks")]
use criterion::{criterion_group, criterion_main};

#[cfg(feature = "benchmarks")]
criterion_group!(benches, codec_benchmark);
#[cfg(feature = "benchmarks")]
criterion_main!(benches);

#[cfg(not(feature = "benchmarks"))]
fn main() {}
