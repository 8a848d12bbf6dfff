use crate::CodecError;
use crate::layout::Layout;
use alloc::vec::Vec;
use checkid_common::alphabet::{self, MAX_VALUE, RADIX};
use core::fmt;
use core::str::FromStr;

/// A single alphabet symbol, stored as its value in `0..32`.
///
/// Symbols order by value, which is also the order of their characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// The symbol with value 0.
    pub const MIN: Symbol = Symbol(0);

    /// The symbol with value 31.
    pub const MAX: Symbol = Symbol(MAX_VALUE);

    /// Returns the symbol with the given value, or `None` above 31.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_VALUE {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the symbol with the given value reduced modulo 32.
    pub const fn wrapping(value: u8) -> Self {
        Self(value % RADIX)
    }

    /// Looks up a character in the alphabet.
    ///
    /// Only the exact alphabet characters are accepted; case folding and
    /// separators are the caller's concern.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii() {
            alphabet::value_of(c as u8).map(Self)
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn to_char(self) -> char {
        alphabet::symbol_of(self.0) as char
    }

    /// Iterates over the whole alphabet in value order.
    pub fn all() -> impl DoubleEndedIterator<Item = Symbol> + ExactSizeIterator {
        (0..RADIX).map(Self)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// An identifier: a fixed sequence of alphabet symbols.
///
/// Construction only checks that every character is a symbol. Whether the
/// length can be partitioned is checked by the operations that need the
/// partition ([`crate::verify`], [`crate::diagnose`], [`crate::correct`]),
/// which report [`CodecError::MalformedIdentifier`] instead of guessing.
///
/// Identifiers are never modified in place; [`Identifier::with_substitution`]
/// returns a new one. Ordering is lexicographic over symbols, which matches the
/// ordering of the identifiers' text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    symbols: Vec<Symbol>,
}

impl Identifier {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline(always)]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }

    /// Returns the partition for this identifier's length.
    pub fn layout(&self) -> Result<Layout, CodecError> {
        Layout::new(self.len())
    }

    /// Returns a copy with the symbol at `index` replaced.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn with_substitution(&self, index: usize, symbol: Symbol) -> Option<Identifier> {
        if index >= self.len() {
            return None;
        }
        let mut symbols = self.symbols.clone();
        symbols[index] = symbol;
        Some(Self { symbols })
    }

    /// Extracts the payload: the data-slot symbols in increasing index order.
    ///
    /// This is the inverse of [`crate::encode`] for identifiers that verify.
    /// For identifiers that do not, it returns whatever the data slots hold.
    pub fn payload(&self) -> Result<Vec<Symbol>, CodecError> {
        let layout = self.layout()?;
        Ok(layout.data_indices().map(|i| self.symbols[i]).collect())
    }

    /// Counts the positions at which two identifiers differ.
    ///
    /// Positions beyond the shorter identifier count as differing.
    pub fn distance(&self, other: &Identifier) -> usize {
        let common = self
            .symbols
            .iter()
            .zip(&other.symbols)
            .filter(|(a, b)| a != b)
            .count();
        common + self.len().abs_diff(other.len())
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

impl From<Vec<Symbol>> for Identifier {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self::new(symbols)
    }
}

impl FromStr for Identifier {
    type Err = CodecError;

    /// Parses the raw, ungrouped form: alphabet characters only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, symbol)| {
                Symbol::from_char(symbol).ok_or(CodecError::UnknownSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip_over_alphabet() {
        for symbol in Symbol::all() {
            assert_eq!(Symbol::from_char(symbol.to_char()), Some(symbol));
        }
        assert_eq!(Symbol::all().len(), 32);
    }

    #[test]
    fn test_confusable_characters_rejected() {
        for c in ['E', 'O', 'P', 'T', 'a', 'z', '-', ' ', 'é'] {
            assert_eq!(Symbol::from_char(c), None, "{:?} should not be a symbol", c);
        }
    }

    #[test]
    fn test_symbol_values() {
        assert_eq!(Symbol::from_char('0').map(Symbol::value), Some(0));
        assert_eq!(Symbol::from_char('A').map(Symbol::value), Some(10));
        assert_eq!(Symbol::from_char('W').map(Symbol::value), Some(28));
        assert_eq!(Symbol::from_char('Z').map(Symbol::value), Some(31));
        assert_eq!(Symbol::new(32), None);
        assert_eq!(Symbol::wrapping(33), Symbol::new(1).unwrap());
    }

    #[test]
    fn test_parse_and_display() {
        let id: Identifier = "ZZW0Q123F456789A".parse().unwrap();
        assert_eq!(id.len(), 16);
        assert_eq!(id.to_string(), "ZZW0Q123F456789A");
    }

    #[test]
    fn test_parse_reports_position_of_unknown_symbol() {
        let err = "ZZW0QE23".parse::<Identifier>().unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownSymbol {
                symbol: 'E',
                position: 5
            }
        );
    }

    #[test]
    fn test_substitution_copies() {
        let id: Identifier = "ZZW0Q123F456789A".parse().unwrap();
        let changed = id.with_substitution(5, Symbol::MAX).unwrap();
        assert_eq!(id.to_string(), "ZZW0Q123F456789A");
        assert_eq!(changed.to_string(), "ZZW0QZ23F456789A");
        assert_eq!(id.distance(&changed), 1);
        assert!(id.with_substitution(16, Symbol::MAX).is_none());
    }

    #[test]
    fn test_payload_reads_data_slots() {
        let id: Identifier = "ZZW0Q123F456789A".parse().unwrap();
        let payload: String = id.payload().unwrap().iter().map(|s| s.to_char()).collect();
        assert_eq!(payload, "0123456789A");
    }

    #[test]
    fn test_ordering_matches_text() {
        let a: Identifier = "0ZZZ".parse().unwrap();
        let b: Identifier = "A000".parse().unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
