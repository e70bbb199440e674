//! Errors produced while parsing tokens and packing or unpacking cell sets.

use core::fmt;

/// A token or a packed buffer could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The token was empty.
    EmptyToken,
    /// The token was longer than 16 hex characters.
    TokenTooLong(usize),
    /// The token contained a character which is not a hex digit.
    InvalidHexChar(char),
    /// The value is not a cell: its face is out of range or it has no sentinel bit at a digit
    /// boundary.
    InvalidCell(u64),
    /// A contract-returned cell value was not a decimal or `0x` hex integer fitting in 64 bits.
    InvalidInteger,
    /// A packed buffer did not start with `0x` followed by an even number of hex characters.
    InvalidHex,
    /// The buffer ended in the middle of a segment.
    Truncated {
        /// Offset of the length byte of the incomplete segment.
        offset: usize,
    },
    /// A segment declared more than 64 bits.
    SegmentTooLong(u8),
    /// The unused low bits of the last payload byte of a segment were not zero.
    NonZeroPadding {
        /// Offset of the length byte of the offending segment.
        offset: usize,
    },
    /// The prefix segment length is neither zero nor a face-aligned width.
    InvalidPrefixLength(u8),
    /// The prefix value uses the virtual leading bit, which is always zero.
    PrefixOverflow,
    /// A residue does not fit below the shared prefix.
    ResidueTooLong {
        /// Declared residue bit length.
        bit_len: u8,
        /// Shared prefix bit length.
        prefix_len: u8,
    },
    /// Cells were not in strictly ascending order.
    Unordered,
    /// The buffer held a prefix but no cells.
    NoCells,
    /// More than one segment was found where a single cell was expected.
    TrailingBytes {
        /// Offset of the first unread byte.
        offset: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::EmptyToken => f.write_str("empty cell token"),
            FormatError::TokenTooLong(len) => {
                write!(f, "cell token has {len} characters, at most 16 allowed")
            }
            FormatError::InvalidHexChar(c) => write!(f, "invalid hex character {c:?} in token"),
            FormatError::InvalidCell(v) => write!(f, "{v:#018x} is not a valid cell id"),
            FormatError::InvalidInteger => f.write_str("cell value is not a 64-bit integer"),
            FormatError::InvalidHex => f.write_str("packed cells must be 0x-prefixed hex bytes"),
            FormatError::Truncated { offset } => {
                write!(f, "segment at byte {offset} is truncated")
            }
            FormatError::SegmentTooLong(n) => write!(f, "segment declares {n} bits, max 64"),
            FormatError::NonZeroPadding { offset } => {
                write!(f, "segment at byte {offset} has non-zero padding bits")
            }
            FormatError::InvalidPrefixLength(n) => write!(f, "invalid shared prefix length {n}"),
            FormatError::PrefixOverflow => f.write_str("shared prefix sets the leading bit"),
            FormatError::ResidueTooLong {
                bit_len,
                prefix_len,
            } => write!(
                f,
                "residue of {bit_len} bits does not fit under a {prefix_len}-bit prefix"
            ),
            FormatError::Unordered => f.write_str("cells are not in strictly ascending order"),
            FormatError::NoCells => f.write_str("packed set contains no cells"),
            FormatError::TrailingBytes { offset } => {
                write!(f, "unexpected trailing bytes at offset {offset}")
            }
        }
    }
}

/// Errors from encoding or decoding a set of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    /// A token or the packed buffer was malformed.
    Format(FormatError),
    /// There were no cells to encode.
    EmptyInput,
}

impl From<FormatError> for PackError {
    fn from(e: FormatError) -> Self {
        PackError::Format(e)
    }
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::Format(e) => e.fmt(f),
            PackError::EmptyInput => f.write_str("cannot pack an empty set of cells"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

#[cfg(feature = "std")]
impl std::error::Error for PackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackError::Format(e) => Some(e),
            PackError::EmptyInput => None,
        }
    }
}
