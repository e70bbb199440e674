//! Packing sets of cells into the compact wire format consumed by the registry contract.
//!
//! A packed set is a sequence of segments (see [`crate::segment`]):
//!
//!   1. The shared prefix: the top bits of the 65-bit view common to all cells, or an empty
//!      segment if there is none.
//!   2. One segment per distinct cell, ascending, holding the bits below the prefix and above the
//!      cell's sentinel.
//!
//! A single packed cell is just the second kind of segment with no prefix and no leading empty
//! segment.
//!
//! Encoding is a function of the set of cells only: order and repetition of the input do not
//! affect the output.

use crate::{
    cell_id::{parse_token, CellId},
    error::{FormatError, PackError},
    prefix::{shared_prefix_len, MAX_SHARED_DIGITS},
    segment::{append_segment, read_segment, Segment, Segments},
    trim::{residue_mask, trim, untrim, widen, Field, Trimmed, FIELD_BITS},
};
use alloc::{string::String, vec::Vec};

/// The shortest non-empty prefix segment: the virtual bit plus the face.
pub const MIN_PREFIX_BITS: u8 = 4;

/// The longest prefix segment: the virtual bit, the face and every comparable digit.
pub const MAX_PREFIX_BITS: u8 = MIN_PREFIX_BITS + 2 * MAX_SHARED_DIGITS;

/// Pack a set of cells.
///
/// Fails with [`PackError::EmptyInput`] if there are no cells.
pub fn pack_cells(cells: impl IntoIterator<Item = CellId>) -> Result<Vec<u8>, PackError> {
    let mut cells: Vec<CellId> = cells.into_iter().collect();
    cells.sort_unstable();
    cells.dedup();

    if cells.is_empty() {
        return Err(PackError::EmptyInput);
    }

    let mut out = Vec::with_capacity(1 + cells.len() * 4);

    // the prefix segment carries one extra bit: the always-zero top bit of the 65-bit view.
    let prefix_len = match shared_prefix_len(&cells) {
        0 => 0,
        shared => shared as usize + 1,
    };
    if prefix_len > 0 {
        let prefix = widen(cells[0]) >> (FIELD_BITS - prefix_len);
        append_segment(&mut out, prefix.to::<u64>(), prefix_len as u8);
    } else {
        append_segment(&mut out, 0, 0);
    }

    let mask = residue_mask(prefix_len);
    for cell in &cells {
        let Trimmed { value, bit_len } = trim(widen(*cell) & mask, prefix_len);
        append_segment(&mut out, value, bit_len);
    }

    Ok(out)
}

/// Pack a single cell as one segment, with no prefix.
pub fn pack_cell(cell: CellId) -> Vec<u8> {
    let Trimmed { value, bit_len } = trim(widen(cell), 0);
    let mut out = Vec::with_capacity(9);
    append_segment(&mut out, value, bit_len);
    out
}

/// Unpack a set of cells, returned in ascending order.
///
/// Cells must be strictly ascending, valid, and fit below a face-aligned prefix. The prefix need
/// not be the longest one possible.
pub fn unpack_cells(buf: &[u8]) -> Result<Vec<CellId>, FormatError> {
    let mut segments = Segments::new(buf);
    let prefix = segments
        .next()
        .ok_or(FormatError::Truncated { offset: 0 })??;

    let prefix_len = prefix.bit_len as usize;
    let prefix_bits = match prefix.bit_len {
        0 => Field::ZERO,
        n if n < MIN_PREFIX_BITS || n > MAX_PREFIX_BITS || n % 2 != 0 => {
            return Err(FormatError::InvalidPrefixLength(n));
        }
        _ if prefix.value >> (prefix_len - 1) != 0 => return Err(FormatError::PrefixOverflow),
        _ => Field::from(prefix.value) << (FIELD_BITS - prefix_len),
    };

    let mut cells: Vec<CellId> = Vec::new();
    for segment in segments {
        let segment = segment?;
        let residue = untrim(segment.value, segment.bit_len, prefix_len)?;
        let cell = restore(prefix_bits | residue, segment, prefix.bit_len)?;

        if cells.last().map_or(false, |last| *last >= cell) {
            return Err(FormatError::Unordered);
        }
        cells.push(cell);
    }

    if cells.is_empty() {
        return Err(FormatError::NoCells);
    }
    Ok(cells)
}

/// Unpack a single cell packed with [`pack_cell`].
pub fn unpack_cell(buf: &[u8]) -> Result<CellId, FormatError> {
    let (segment, end) = read_segment(buf, 0)?;
    if end != buf.len() {
        return Err(FormatError::TrailingBytes { offset: end });
    }
    restore(untrim(segment.value, segment.bit_len, 0)?, segment, 0)
}

// Convert a reconstructed view back to a cell. The top bit of the view must be clear.
fn restore(view: Field, segment: Segment, prefix_len: u8) -> Result<CellId, FormatError> {
    if view.bit(FIELD_BITS - 1) {
        return Err(FormatError::ResidueTooLong {
            bit_len: segment.bit_len,
            prefix_len,
        });
    }
    CellId::new(view.to::<u64>())
}

/// Render packed bytes as `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}

/// Parse hex produced by [`to_hex`]. The `0x` prefix is optional.
pub fn from_hex(packed: &str) -> Result<Vec<u8>, FormatError> {
    let digits = packed.strip_prefix("0x").unwrap_or(packed);
    hex::decode(digits).map_err(|_| FormatError::InvalidHex)
}

/// Encode a batch of tokens as a packed set in hex.
pub fn encode_set<S: AsRef<str>>(tokens: &[S]) -> Result<String, PackError> {
    let cells = tokens
        .iter()
        .map(|t| parse_token(t.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    pack_cells(cells).map(|bytes| to_hex(&bytes))
}

/// Encode one token as a single packed cell in hex.
pub fn encode_single(token: &str) -> Result<String, PackError> {
    let cell = parse_token(token)?;
    Ok(to_hex(&pack_cell(cell)))
}

/// Decode a hex packed set into its tokens, in ascending cell order.
pub fn decode_set(packed: &str) -> Result<Vec<String>, PackError> {
    let cells = unpack_cells(&from_hex(packed)?)?;
    Ok(cells.iter().map(CellId::to_token).collect())
}

/// Decode a hex single packed cell into its token.
pub fn decode_single(packed: &str) -> Result<String, PackError> {
    Ok(unpack_cell(&from_hex(packed)?)?.to_token())
}
