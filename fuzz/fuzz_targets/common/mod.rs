use arbitrary::{Arbitrary, Result, Unstructured};
use cellpack_core::{
    cell_id::{MAX_LEVEL, NUM_FACES},
    CellId, ChildPosition,
};

/// A set of cells, possibly with duplicates, sharing a common ancestor.
#[derive(Debug)]
pub struct Parcel {
    pub cells: Vec<CellId>,
}

impl<'a> Arbitrary<'a> for Parcel {
    fn arbitrary(input: &mut Unstructured<'a>) -> Result<Self> {
        let face = input.int_in_range(0..=NUM_FACES - 1)?;
        // unwrap: face is in range.
        let ancestor = descend(input, CellId::from_face(face).unwrap())?;
        let len = input.int_in_range(1..=64)?;
        let mut cells = Vec::with_capacity(len);
        for _ in 0..len {
            cells.push(descend(input, ancestor)?);
        }
        Ok(Self { cells })
    }
}

fn descend(input: &mut Unstructured, mut cell: CellId) -> Result<CellId> {
    let depth = input.int_in_range(0..=MAX_LEVEL - cell.level())?;
    for _ in 0..depth {
        // unwrap: position is in range and depth never goes below the last level.
        let position = ChildPosition::new(input.int_in_range(0..=3)?).unwrap();
        cell = cell.child(position).unwrap();
    }
    Ok(cell)
}
