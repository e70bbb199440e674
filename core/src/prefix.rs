//! Shared-prefix analysis over a sorted set of cells.
//!
//! Cells sharing a face and a run of leading digits are packed as one prefix followed by the
//! remaining low bits of each cell. The prefix is always face-aligned and covers whole digits.

use crate::cell_id::{CellId, FACE_BITS};

/// The number of digits which may be shared: digit positions 59 down to 3.
pub const MAX_SHARED_DIGITS: u8 = 29;

/// The lowest bit position of the deepest digit considered for sharing.
const LAST_DIGIT_SHIFT: u32 = 3;

/// The lowest bit position of the first digit.
const FIRST_DIGIT_SHIFT: u32 = 59;

/// Compute the number of leading bits shared by every cell of an ascending, deduplicated set.
///
/// The result is 0 when there are fewer than two cells or the faces differ, and otherwise
/// `3 + 2k` for the face plus `k` whole digits. Since the set is sorted, agreement between the
/// first and last cells implies agreement for all cells in between.
///
/// `k` never exceeds the level of the shallowest cell. Beyond its level a cell's digits are its
/// sentinel and padding, which must stay below the prefix to be recoverable.
pub fn shared_prefix_len(cells: &[CellId]) -> u8 {
    let (first, last) = match cells {
        [first, .., last] => (first.to_u64(), last.to_u64()),
        _ => return 0,
    };

    if first >> (64 - FACE_BITS) != last >> (64 - FACE_BITS) {
        return 0;
    }

    let max_digits = cells
        .iter()
        .map(CellId::level)
        .min()
        .unwrap_or(0)
        .min(MAX_SHARED_DIGITS);

    let mut prefix_len = FACE_BITS as u8;
    let mut digits = 0;
    for shift in (LAST_DIGIT_SHIFT..=FIRST_DIGIT_SHIFT).rev().step_by(2) {
        if digits == max_digits {
            break;
        }
        if (first >> shift) & 0b11 != (last >> shift) & 0b11 {
            break;
        }
        prefix_len += 2;
        digits += 1;
    }

    prefix_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_id::{parse_token, ChildPosition};

    fn cells(tokens: &[&str]) -> Vec<CellId> {
        let mut cells: Vec<_> = tokens.iter().map(|t| parse_token(t).unwrap()).collect();
        cells.sort();
        cells
    }

    #[test]
    fn single_cell_has_no_prefix() {
        assert_eq!(shared_prefix_len(&cells(&["89c25"])), 0);
        assert_eq!(shared_prefix_len(&[]), 0);
    }

    #[test]
    fn different_faces_share_nothing() {
        assert_eq!(shared_prefix_len(&cells(&["1", "b"])), 0);
        assert_eq!(shared_prefix_len(&cells(&["89c25", "54"])), 0);
    }

    #[test]
    fn face_and_digits() {
        // 0x89c25.. and 0x89c2c.. first differ at bit 47, inside the seventh digit.
        assert_eq!(shared_prefix_len(&cells(&["89c25", "89c2c"])), 3 + 2 * 6);
    }

    #[test]
    fn siblings_share_their_parent() {
        let parent = CellId::from_face(2)
            .unwrap()
            .child(ChildPosition::new(2).unwrap())
            .unwrap();
        let children = parent.children().unwrap();
        assert_eq!(shared_prefix_len(&children), 3 + 2);
    }

    #[test]
    fn prefix_is_capped_at_shallowest_level() {
        // "14" is child 2 of face 0, whose sentinel reads like a matching first digit.
        let set = cells(&["1", "14"]);
        assert_eq!(set[0].level(), 0);
        assert_eq!(shared_prefix_len(&set), 3);
    }

    #[test]
    fn deepest_shared_digit() {
        let a = parse_token("89c2500000000001").unwrap();
        let b = parse_token("89c2500000000007").unwrap();
        // leaves differing only in the last digit (bits 2..1) share all 29 comparable digits.
        assert_eq!(shared_prefix_len(&[a, b]), 3 + 2 * MAX_SHARED_DIGITS);
    }
}
