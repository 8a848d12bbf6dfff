//! Common definitions and constants shared across the checked-identifier system.
//!
//! This crate provides the symbol alphabet and its reverse lookup table, the
//! display grouping used when identifiers are shown to people, and the length
//! and search limits used by the codec, the I/O layer, and the host tools.

#![no_std]

/// The 32-symbol alphabet every identifier is written in.
///
/// Symbols are chosen so that no two are easily confused when read aloud or
/// copied by hand: the digits plus the uppercase Latin letters minus `E`, `O`,
/// `P` and `T`. A symbol's value is its position in [`SYMBOLS`].
pub mod alphabet {
    /// Alphabet symbols in value order.
    ///
    /// The bytes are ASCII-ascending, so comparing two identifiers character by
    /// character gives the same order as comparing their symbol values. The
    /// corrector relies on this when it returns sorted candidates.
    pub const SYMBOLS: &[u8; 32] = b"0123456789ABCDFGHIJKLMNQRSUVWXYZ";

    /// Number of symbols in the alphabet, and the modulus of every checksum.
    pub const RADIX: u8 = 32;

    /// Largest symbol value.
    pub const MAX_VALUE: u8 = RADIX - 1;

    /// Marker stored in [`VALUES`] for bytes outside the alphabet.
    pub const NOT_A_SYMBOL: u8 = 0xFF;

    /// Reverse table from byte to symbol value, built at compile time.
    ///
    /// Entries for bytes that are not alphabet symbols hold [`NOT_A_SYMBOL`].
    /// Lookup is a single index, so decoding an identifier never scans the
    /// alphabet.
    pub const VALUES: [u8; 256] = build_values();

    const fn build_values() -> [u8; 256] {
        let mut table = [NOT_A_SYMBOL; 256];
        let mut i = 0;
        while i < SYMBOLS.len() {
            table[SYMBOLS[i] as usize] = i as u8;
            i += 1;
        }
        table
    }

    /// Returns the value of an alphabet byte, or `None` if the byte is not a symbol.
    #[inline(always)]
    pub const fn value_of(byte: u8) -> Option<u8> {
        match VALUES[byte as usize] {
            NOT_A_SYMBOL => None,
            v => Some(v),
        }
    }

    /// Returns the alphabet byte for a symbol value.
    ///
    /// Values are reduced modulo [`RADIX`], so any `u8` maps to a symbol.
    #[inline(always)]
    pub const fn symbol_of(value: u8) -> u8 {
        SYMBOLS[(value % RADIX) as usize]
    }
}

/// Grouping applied when identifiers are shown to people.
///
/// The codec itself only operates on the ungrouped form; the separator is
/// presentation only and carries no information.
pub mod display {
    /// Number of symbols per display group.
    pub const GROUP_SIZE: usize = 4;

    /// Character inserted between display groups.
    pub const SEPARATOR: char = '-';
}

/// Length and search limits.
pub mod limits {
    /// Shortest identifier length the layout accepts.
    ///
    /// A length-2 identifier holds only the overall checksum and one parity
    /// slot; it carries no payload but is still a consistent partition.
    pub const MIN_LENGTH: usize = 2;

    /// Length used by the host tools when none is given.
    pub const DEFAULT_LENGTH: usize = 16;

    /// Lengths offered by interactive front ends.
    ///
    /// All are multiples of [`crate::display::GROUP_SIZE`], so displayed
    /// identifiers always end on a full group.
    pub const DEMO_LENGTHS: [usize; 7] = [8, 12, 16, 20, 24, 28, 32];

    /// Default correction depth.
    ///
    /// A depth of `d` lets the corrector substitute up to `d + 1` positions at
    /// once. Cost grows as `32^(d + 1)`, so callers raise it with care.
    pub const DEFAULT_MAX_DEPTH: usize = 1;
}
