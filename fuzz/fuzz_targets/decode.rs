#![no_main]

use cellpack_core::pack::{pack_cell, pack_cells, unpack_cell, unpack_cells};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive re-encoding.
    if let Ok(cells) = unpack_cells(data) {
        let packed = pack_cells(cells.iter().copied()).unwrap();
        assert_eq!(unpack_cells(&packed).unwrap(), cells);
    }

    // Single cells have exactly one encoding.
    if let Ok(cell) = unpack_cell(data) {
        assert_eq!(pack_cell(cell), data);
    }
});
