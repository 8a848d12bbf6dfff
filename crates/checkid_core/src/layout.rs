//! Partition of identifier positions into checksum and data roles.
//!
//! For an identifier of length `L` with `k = ceil(log2(L))`:
//!
//! ```text
//! index   0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15
//! role    O   P0  P1  d   P2  d   d   d   P3  d   d   d   d   d   d   d
//! P0          *       *       *       *       *       *       *       *
//! P1              *   *           *   *           *   *           *   *
//! P2                      *   *   *   *                   *   *   *   *
//! P3                                      *   *   *   *   *   *   *   *
//! ```
//!
//! Parity slot `P(i)` sits at index `2^i` and covers every index with bit `i`
//! set. No such index other than `2^i` itself is a power of two, and index 0
//! has no bits set, so each parity level covers data slots only. The overall
//! slot `O` at index 0 covers the parity slots.

use crate::CodecError;
use checkid_common::limits::MIN_LENGTH;

/// The role an index plays in an identifier of a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexRole {
    /// Index 0: the checksum over all parity slots.
    Overall,
    /// Index `2^level`: the checksum over that level's pattern.
    Parity(u32),
    /// Any other index: one payload symbol.
    Data,
}

/// Number of parity levels for a length: `ceil(log2(len))`, or 0 for `len <= 1`.
#[inline(always)]
pub const fn parity_level_count(len: usize) -> u32 {
    if len <= 1 {
        0
    } else {
        usize::BITS - (len - 1).leading_zeros()
    }
}

/// Number of payload symbols an identifier of length `len` carries.
pub fn required_payload_len(len: usize) -> Result<usize, CodecError> {
    Layout::new(len).map(|layout| layout.payload_len())
}

/// A validated partition of the positions `0..len`.
///
/// The layout holds no index tables; every sequence is generated on demand
/// and is a pure function of the length, so callers can walk them as often
/// as they like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    len: usize,
    levels: u32,
}

impl Layout {
    /// Validates a length and returns its partition.
    ///
    /// Lengths below [`MIN_LENGTH`] are rejected with
    /// [`CodecError::MalformedIdentifier`]: they have no room for a parity
    /// slot, and the number of levels must stay strictly below the length.
    pub fn new(len: usize) -> Result<Self, CodecError> {
        let levels = parity_level_count(len);
        if len < MIN_LENGTH || levels as usize >= len {
            return Err(CodecError::MalformedIdentifier { len });
        }
        Ok(Self { len, levels })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of parity levels, `k`.
    #[inline(always)]
    pub fn parity_levels(&self) -> u32 {
        self.levels
    }

    /// Number of payload symbols an identifier of this length carries.
    ///
    /// Every index except the overall slot and the `k` parity slots is a
    /// data slot, so this is `len - 1 - k`.
    #[inline(always)]
    pub fn payload_len(&self) -> usize {
        self.len - 1 - self.levels as usize
    }

    /// Index of the parity slot for `level`.
    #[inline(always)]
    pub const fn parity_slot(level: u32) -> usize {
        1 << level
    }

    /// Parity levels `0..k`.
    pub fn levels(&self) -> impl DoubleEndedIterator<Item = u32> + Clone + use<> {
        0..self.levels
    }

    /// Parity slot indices `1, 2, 4, ..., 2^(k-1)` in increasing order.
    pub fn parity_indices(&self) -> impl Iterator<Item = usize> + Clone + use<> {
        self.levels().map(Self::parity_slot)
    }

    /// Data slot indices in increasing order.
    ///
    /// Index 0 is never produced; it belongs to the overall checksum.
    pub fn data_indices(&self) -> impl Iterator<Item = usize> + Clone + use<> {
        (1..self.len).filter(|i| !i.is_power_of_two())
    }

    /// Indices covered by parity `level`: bit `level` set, the slot itself excluded.
    ///
    /// Levels at or above `k` cover nothing.
    pub fn pattern(&self, level: u32) -> impl Iterator<Item = usize> + Clone + use<> {
        let (bit, end) = if level < self.levels {
            (Self::parity_slot(level), self.len)
        } else {
            (1, 0)
        };
        (bit + 1..end).filter(move |j| j & bit != 0)
    }

    /// Role of `index`, or `None` if it lies outside the identifier.
    pub fn role(&self, index: usize) -> Option<IndexRole> {
        if index >= self.len {
            None
        } else if index == 0 {
            Some(IndexRole::Overall)
        } else if index.is_power_of_two() {
            Some(IndexRole::Parity(index.trailing_zeros()))
        } else {
            Some(IndexRole::Data)
        }
    }
}
