#![no_main]

mod common;

use cellpack_core::pack::{pack_cells, unpack_cells};
use common::Parcel;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|parcel: Parcel| {
    let Parcel { mut cells } = parcel;

    let packed = pack_cells(cells.iter().copied()).unwrap();
    cells.sort_unstable();
    cells.dedup();
    assert_eq!(unpack_cells(&packed).unwrap(), cells);
});
