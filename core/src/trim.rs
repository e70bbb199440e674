//! Trimming cells below a shared prefix down to their meaningful bits.
//!
//! Packing works on a 65-bit view of each cell: the 64-bit value preceded by one zero bit. A
//! prefix of `p` bits is the top `p` bits of that view and the residue is the remaining
//! `65 - p` bits. With no prefix the residue is the whole view, whose top bit is always zero.
//!
//! A residue ends with the cell's unused digits (pairs of zero bits) and its sentinel. Both are
//! implied by the residue's length, so only the bits above the sentinel are stored.

use crate::{cell_id::CellId, error::FormatError};
use ruint::Uint;

/// The width of the packing view of a cell.
pub const FIELD_BITS: usize = 65;

/// A cell in the packing view.
pub type Field = Uint<FIELD_BITS, 2>;

/// A residue stripped of trailing padding and its sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trimmed {
    pub value: u64,
    pub bit_len: u8,
}

/// Place a cell in the packing view.
pub fn widen(cell: CellId) -> Field {
    Field::from(cell.to_u64())
}

/// The mask keeping the low `65 - prefix_len` bits of the view.
///
/// Equivalent to shifting a 64-bit all-ones value right by `prefix_len - 1`. A `prefix_len` of
/// zero keeps all 64 bits of the cell.
pub fn residue_mask(prefix_len: usize) -> Field {
    match prefix_len {
        0 => Field::from(u64::MAX),
        p => Field::MAX >> p,
    }
}

/// Trim a residue lying below a prefix of `prefix_len` bits.
///
/// Trailing zero digits are dropped two bits at a time, then the sentinel.
///
/// Panics if the residue is zero, which cannot happen for a valid cell below a prefix computed by
/// [`crate::prefix::shared_prefix_len`].
pub fn trim(residue: Field, prefix_len: usize) -> Trimmed {
    assert!(!residue.is_zero(), "residue has no sentinel");
    let trimmed = residue.trailing_zeros() / 2 * 2 + 1;
    Trimmed {
        value: (residue >> trimmed).to::<u64>(),
        bit_len: (FIELD_BITS - prefix_len - trimmed) as u8,
    }
}

/// Restore a residue from its trimmed form, re-appending the sentinel and zero padding.
pub fn untrim(value: u64, bit_len: u8, prefix_len: usize) -> Result<Field, FormatError> {
    let n = bit_len as usize;
    if n + prefix_len >= FIELD_BITS {
        return Err(FormatError::ResidueTooLong {
            bit_len,
            prefix_len: prefix_len as u8,
        });
    }
    let padding = FIELD_BITS - prefix_len - n - 1;
    Ok(((Field::from(value) << 1) | Field::from(1u64)) << padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_id::parse_token;

    fn view(token: &str) -> Field {
        widen(parse_token(token).unwrap())
    }

    #[test]
    fn mask_widths() {
        assert_eq!(residue_mask(0), Field::from(u64::MAX));
        assert!(!residue_mask(0).bit(FIELD_BITS - 1));
        assert_eq!(view("89c2500000000001") & residue_mask(0), view("89c2500000000001"));
        assert_eq!(residue_mask(16), Field::from((1u64 << 49) - 1));
        // matches a 64-bit all-ones value shifted right by `prefix_len - 1`.
        for prefix_len in (4..=62).step_by(2) {
            assert_eq!(
                residue_mask(prefix_len),
                Field::from(u64::MAX >> (prefix_len - 1))
            );
        }
    }

    #[test]
    fn trim_whole_cell() {
        assert_eq!(
            trim(view("89c25"), 0),
            Trimmed {
                value: 0x44e12,
                bit_len: 20
            }
        );
        assert_eq!(trim(view("b"), 0), Trimmed { value: 5, bit_len: 4 });
        assert_eq!(
            trim(view("89c2500000000001"), 0),
            Trimmed {
                value: 0x44e1_2800_0000_0000,
                bit_len: 64
            }
        );
    }

    #[test]
    fn trim_below_prefix() {
        let mask = residue_mask(16);
        assert_eq!(
            trim(view("89c25") & mask, 16),
            Trimmed { value: 2, bit_len: 4 }
        );
        assert_eq!(
            trim(view("89c2c") & mask, 16),
            Trimmed { value: 1, bit_len: 2 }
        );
    }

    #[test]
    fn sentinel_at_top_of_residue_trims_to_nothing() {
        let residue = view("1") & residue_mask(4);
        assert_eq!(trim(residue, 4), Trimmed { value: 0, bit_len: 0 });
        assert_eq!(untrim(0, 0, 4), Ok(residue));
    }

    #[test]
    fn untrim_restores_residue() {
        let mask = residue_mask(16);
        for token in ["89c25", "89c2c", "89c2500000000001"] {
            let residue = view(token) & mask;
            let Trimmed { value, bit_len } = trim(residue, 16);
            assert_eq!(untrim(value, bit_len, 16), Ok(residue));
        }
        for token in ["1", "b", "89c25", "89c2500000000001"] {
            let Trimmed { value, bit_len } = trim(view(token), 0);
            assert_eq!(untrim(value, bit_len, 0), Ok(view(token)));
        }
    }

    #[test]
    fn untrim_rejects_residue_overlapping_prefix() {
        assert_eq!(
            untrim(0, 50, 16),
            Err(FormatError::ResidueTooLong {
                bit_len: 50,
                prefix_len: 16
            })
        );
        assert!(untrim(0, 48, 16).is_ok());
    }
}
