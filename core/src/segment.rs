//! Length-prefixed bit segments.
//!
//! A segment is one length byte `n` in `0..=64` followed by `ceil(n / 8)` payload bytes. The
//! payload holds the low `n` bits of a value, most significant bit first, left-aligned so that the
//! unused low bits of the final byte are zero.

use crate::error::FormatError;
use alloc::vec::Vec;
use bitvec::prelude::*;

/// The largest number of bits a segment may carry.
pub const MAX_SEGMENT_BITS: u8 = 64;

/// A decoded segment: the right-aligned value and its width in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub value: u64,
    pub bit_len: u8,
}

/// The number of payload bytes following a length byte of `bit_len`.
pub fn payload_len(bit_len: u8) -> usize {
    (bit_len as usize + 7) / 8
}

/// Append a segment holding the low `bit_len` bits of `value`.
///
/// Panics if `bit_len` is greater than 64.
pub fn append_segment(out: &mut Vec<u8>, value: u64, bit_len: u8) {
    assert!(
        bit_len <= MAX_SEGMENT_BITS,
        "segment of {} bits exceeds {}",
        bit_len,
        MAX_SEGMENT_BITS
    );
    out.push(bit_len);

    let start = out.len();
    out.resize(start + payload_len(bit_len), 0);

    let n = bit_len as usize;
    let value = value.to_be_bytes();
    out[start..].view_bits_mut::<Msb0>()[..n]
        .copy_from_bitslice(&value.view_bits::<Msb0>()[64 - n..]);
}

/// Read the segment whose length byte is at `cursor`.
///
/// Returns the segment and the offset just past its payload.
pub fn read_segment(buf: &[u8], cursor: usize) -> Result<(Segment, usize), FormatError> {
    let bit_len = *buf
        .get(cursor)
        .ok_or(FormatError::Truncated { offset: cursor })?;
    if bit_len > MAX_SEGMENT_BITS {
        return Err(FormatError::SegmentTooLong(bit_len));
    }

    let start = cursor + 1;
    let end = start + payload_len(bit_len);
    let payload = buf
        .get(start..end)
        .ok_or(FormatError::Truncated { offset: cursor })?;

    let n = bit_len as usize;
    let bits = payload.view_bits::<Msb0>();
    if bits[n..].any() {
        return Err(FormatError::NonZeroPadding { offset: cursor });
    }

    let mut value = [0u8; 8];
    value.view_bits_mut::<Msb0>()[64 - n..].copy_from_bitslice(&bits[..n]);

    Ok((
        Segment {
            value: u64::from_be_bytes(value),
            bit_len,
        },
        end,
    ))
}

/// Iterator over consecutive segments of a buffer.
///
/// Stops after the first error.
pub struct Segments<'a> {
    buf: &'a [u8],
    cursor: usize,
    failed: bool,
}

impl<'a> Segments<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Segments {
            buf,
            cursor: 0,
            failed: false,
        }
    }

    /// The offset of the next length byte.
    pub fn offset(&self) -> usize {
        self.cursor
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<Segment, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.buf.len() {
            return None;
        }

        match read_segment(self.buf, self.cursor) {
            Ok((segment, next)) => {
                self.cursor = next;
                Some(Ok(segment))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
