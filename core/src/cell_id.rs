//! Cell identifiers and their hex token form.
//!
//! A cell identifier is a 64-bit integer naming a node of a quad-tree rooted at one of six cube
//! faces. From the most significant bit down it holds:
//!
//!   - 3 bits of face, 0 to 5.
//!   - up to 30 digits of 2 bits each, one per tree level, selecting one of 4 children.
//!   - a single sentinel bit set to 1 right after the last meaningful digit. All bits below the
//!     sentinel are zero.
//!
//! Because the sentinel always sits at an even bit index, the lowest set bit of an identifier
//! determines its level: a face cell has the sentinel at bit 60 and a leaf cell at bit 0.
//!
//! Tokens are the canonical textual form: the identifier written as 16 hex characters with the
//! trailing zero nibbles removed.

use crate::error::FormatError;
use alloc::string::String;
use core::{fmt, str::FromStr};

/// The number of cube faces.
pub const NUM_FACES: u8 = 6;

/// The deepest level of the quad-tree. Leaf cells live here.
pub const MAX_LEVEL: u8 = 30;

/// The number of bits naming the face.
pub const FACE_BITS: u32 = 3;

/// The number of bits below the face: 30 digits plus the sentinel.
pub const POS_BITS: u32 = 2 * MAX_LEVEL as u32 + 1;

/// The maximum length of a token, in hex characters.
pub const MAX_TOKEN_LEN: usize = 16;

// One bit set at every even position up to and including bit 60: the places a sentinel may be.
const SENTINEL_POSITIONS: u64 = 0x1555_5555_5555_5555;

/// A valid cell identifier.
///
/// # Ordering
///
/// Cells order by their integer value, which is a depth-first order of the quad-tree where a
/// cell sorts between the descendants of its first two and last two children.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshDeserialize, borsh::BorshSerialize)
)]
pub struct CellId(u64);

/// The position of a child within its parent, 0 to 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChildPosition(u8);

impl ChildPosition {
    pub fn new(position: u8) -> Option<Self> {
        if position > 3 {
            return None;
        }
        Some(Self(position))
    }

    pub fn to_u8(self) -> u8 {
        self.0
    }

    /// All four positions in ascending order.
    pub fn all() -> [ChildPosition; 4] {
        [Self(0), Self(1), Self(2), Self(3)]
    }
}

impl CellId {
    /// Interpret a raw 64-bit value as a cell identifier.
    pub fn new(raw: u64) -> Result<Self, FormatError> {
        if !Self::is_valid(raw) {
            return Err(FormatError::InvalidCell(raw));
        }
        Ok(CellId(raw))
    }

    /// Whether the raw value is a well-formed cell identifier.
    pub fn is_valid(raw: u64) -> bool {
        let lsb = raw & raw.wrapping_neg();
        (raw >> POS_BITS) < NUM_FACES as u64 && lsb & SENTINEL_POSITIONS != 0
    }

    /// The top-level cell covering a whole face.
    pub fn from_face(face: u8) -> Option<Self> {
        if face >= NUM_FACES {
            return None;
        }
        Some(CellId(((face as u64) << POS_BITS) | (1 << (POS_BITS - 1))))
    }

    /// Parse a token, see [`parse_token`].
    pub fn from_token(token: &str) -> Result<Self, FormatError> {
        parse_token(token)
    }

    /// Format as a token, see [`format_token`].
    pub fn to_token(&self) -> String {
        format_token(*self)
    }

    /// Parse a cell identifier as returned by the registry contract: a decimal integer, or a
    /// `0x`-prefixed hex integer.
    pub fn from_contract_value(value: &str) -> Result<Self, FormatError> {
        let value = value.trim();
        let raw = match value.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => value.parse::<u64>(),
        }
        .map_err(|_| FormatError::InvalidInteger)?;
        Self::new(raw)
    }

    /// The raw 64-bit value.
    pub fn to_u64(self) -> u64 {
        self.0
    }

    pub fn face(&self) -> u8 {
        (self.0 >> POS_BITS) as u8
    }

    /// The value of the lowest set bit, i.e. the sentinel.
    pub fn lsb(&self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    /// The depth of the cell in the quad-tree, 0 for a face cell.
    pub fn level(&self) -> u8 {
        (MAX_LEVEL as u32 - self.0.trailing_zeros() / 2) as u8
    }

    pub fn is_face(&self) -> bool {
        self.level() == 0
    }

    pub fn is_leaf(&self) -> bool {
        self.0 & 1 == 1
    }

    /// The child at the given position, or `None` for leaf cells.
    pub fn child(&self, position: ChildPosition) -> Option<Self> {
        if self.is_leaf() {
            return None;
        }
        let lsb = self.lsb();
        let child_lsb = lsb >> 2;
        Some(CellId(
            self.0 - lsb + (2 * position.0 as u64 + 1) * child_lsb,
        ))
    }

    /// The four children in ascending order, or `None` for leaf cells.
    pub fn children(&self) -> Option<[Self; 4]> {
        if self.is_leaf() {
            return None;
        }
        let lsb = self.lsb();
        let child_lsb = lsb >> 2;
        let first = self.0 - lsb + child_lsb;
        Some([0, 1, 2, 3].map(|i| CellId(first + 2 * i * child_lsb)))
    }

    /// The enclosing cell one level up, or `None` for face cells.
    pub fn parent(&self) -> Option<Self> {
        if self.is_face() {
            return None;
        }
        let parent_lsb = self.lsb() << 2;
        Some(CellId((self.0 & parent_lsb.wrapping_neg()) | parent_lsb))
    }

    /// The smallest leaf value contained in this cell.
    pub fn range_min(&self) -> u64 {
        self.0 - (self.lsb() - 1)
    }

    /// The largest leaf value contained in this cell.
    pub fn range_max(&self) -> u64 {
        self.0 + (self.lsb() - 1)
    }

    /// Whether `other` is this cell or one of its descendants.
    pub fn contains(&self, other: &CellId) -> bool {
        self.range_min() <= other.0 && other.0 <= self.range_max()
    }
}

/// Parse a token into a cell identifier.
///
/// The token is right-padded with `'0'` to 16 hex characters and read as a big-endian integer.
/// Upper-case hex digits are accepted.
pub fn parse_token(token: &str) -> Result<CellId, FormatError> {
    if token.is_empty() {
        return Err(FormatError::EmptyToken);
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(FormatError::TokenTooLong(token.len()));
    }
    if let Some(c) = token.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidHexChar(c));
    }

    let mut padded = [b'0'; MAX_TOKEN_LEN];
    padded[..token.len()].copy_from_slice(token.as_bytes());
    let mut bytes = [0u8; 8];
    hex::decode_to_slice(padded, &mut bytes).map_err(|_| FormatError::InvalidHex)?;

    CellId::new(u64::from_be_bytes(bytes))
}

/// Format a cell identifier as a token: lowercase hex without trailing zero nibbles.
pub fn format_token(cell: CellId) -> String {
    let mut token = hex::encode(cell.0.to_be_bytes());
    let len = token.trim_end_matches('0').len().max(1);
    token.truncate(len);
    token
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_token(*self))
    }
}

impl FromStr for CellId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(token: &str) -> CellId {
        parse_token(token).unwrap()
    }

    #[test]
    fn token_pads_to_sixteen_nibbles() {
        assert_eq!(cell("89c25").to_u64(), 0x89c2_5000_0000_0000);
        assert_eq!(cell("1").to_u64(), 0x1000_0000_0000_0000);
        assert_eq!(cell("89C25"), cell("89c25"));
        assert_eq!(CellId::from_token("89c25"), Ok(cell("89c25")));
        assert_eq!(CellId::from_token(""), Err(FormatError::EmptyToken));
    }

    #[test]
    fn token_format_strips_trailing_zeros() {
        assert_eq!(cell("89c25").to_token(), "89c25");
        assert_eq!(cell("89c2500000000001").to_token(), "89c2500000000001");
        assert_eq!(CellId::from_face(0).unwrap().to_token(), "1");
        assert_eq!(CellId::from_face(5).unwrap().to_token(), "b");
        assert_eq!(cell("89C2C").to_string(), "89c2c");
    }

    #[test]
    fn token_parse_errors() {
        assert_eq!(parse_token("zz"), Err(FormatError::InvalidHexChar('z')));
        assert_eq!(parse_token(""), Err(FormatError::EmptyToken));
        assert_eq!(
            parse_token("89c2500000000000f"),
            Err(FormatError::TokenTooLong(17))
        );
        // no sentinel at all.
        assert_eq!(parse_token("0"), Err(FormatError::InvalidCell(0)));
        // sentinel at an odd bit.
        assert!(matches!(parse_token("8"), Err(FormatError::InvalidCell(_))));
        // face 6.
        assert!(matches!(parse_token("d"), Err(FormatError::InvalidCell(_))));
    }

    #[test]
    fn face_and_level() {
        let face = CellId::from_face(4).unwrap();
        assert_eq!(face.face(), 4);
        assert_eq!(face.level(), 0);
        assert!(CellId::from_face(NUM_FACES).is_none());

        assert_eq!(cell("89c25").level(), 8);
        assert_eq!(cell("89c2c").level(), 7);
        assert_eq!(cell("89c2500000000001").level(), MAX_LEVEL);
        assert!(cell("89c2500000000001").is_leaf());
    }

    #[test]
    fn children_and_parent() {
        let face = CellId::from_face(2).unwrap();
        let children = face.children().unwrap();
        for (pos, child) in ChildPosition::all().into_iter().zip(children) {
            assert_eq!(face.child(pos), Some(child));
            assert_eq!(child.level(), 1);
            assert_eq!(child.parent(), Some(face));
            assert!(face.contains(&child));
        }

        let sorted = {
            let mut v: Vec<CellId> = children.to_vec();
            v.sort();
            v
        };
        assert_eq!(&sorted[..], &children[..]);
        assert!(face.parent().is_none());

        let leaf = cell("89c2500000000001");
        assert!(leaf.children().is_none());
        assert!(leaf.child(ChildPosition::new(0).unwrap()).is_none());
    }

    #[test]
    fn containment_is_range_based() {
        let parent = cell("89c24");
        let inside = cell("89c25");
        let outside = cell("89c2c");
        assert!(parent.contains(&inside));
        assert!(!parent.contains(&outside));
        assert!(!inside.contains(&parent));
        assert!(parent.contains(&parent));
    }

    #[test]
    fn contract_values() {
        let c = cell("89c25");
        assert_eq!(CellId::from_contract_value(&c.to_u64().to_string()), Ok(c));
        assert_eq!(CellId::from_contract_value("0x89c2500000000000"), Ok(c));
        assert_eq!(
            CellId::from_contract_value("twelve"),
            Err(FormatError::InvalidInteger)
        );
    }

    #[test]
    fn invalid_child_position() {
        assert_eq!(None, ChildPosition::new(4));
        assert_eq!(Some(3), ChildPosition::new(3).map(ChildPosition::to_u8));
    }
}
