use crate::identifier::Symbol;
use checkid_common::alphabet::{MAX_VALUE, RADIX};

/// Reduces a set of symbols to one checksum symbol.
///
/// Sums the symbol values modulo 32 and returns the symbol at position
/// `31 - sum`. The reflection is part of the identifier format: changing it
/// invalidates every identifier already issued.
pub fn checksum<I>(symbols: I) -> Symbol
where
    I: IntoIterator<Item = Symbol>,
{
    let sum = symbols
        .into_iter()
        .fold(0u8, |acc, s| (acc + s.value()) % RADIX);
    Symbol::wrapping(MAX_VALUE - sum)
}

/// Checksum over the symbols at `indices`.
#[inline(always)]
pub(crate) fn checksum_at<I>(symbols: &[Symbol], indices: I) -> Symbol
where
    I: IntoIterator<Item = usize>,
{
    checksum(indices.into_iter().map(|i| symbols[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c).unwrap()
    }

    #[test]
    fn test_empty_set_reflects_to_last_symbol() {
        assert_eq!(checksum(core::iter::empty::<Symbol>()), sym('Z'));
    }

    #[test]
    fn test_reflection() {
        assert_eq!(checksum([sym('Z')]), sym('0'));
        assert_eq!(checksum([sym('0')]), sym('Z'));
        // 1 + 2 = 3, 31 - 3 = 28
        assert_eq!(checksum([sym('1'), sym('2')]), sym('W'));
    }

    #[test]
    fn test_sum_wraps_modulo_radix() {
        // 31 + 31 = 62 = 30 (mod 32), 31 - 30 = 1
        assert_eq!(checksum([sym('Z'), sym('Z')]), sym('1'));
        let many = core::iter::repeat_n(sym('Z'), 1000);
        // 1000 * 31 = 31000 = 24 (mod 32), 31 - 24 = 7
        assert_eq!(checksum(many), sym('7'));
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = [sym('A'), sym('7'), sym('Q'), sym('0')];
        let mut b = a;
        b.reverse();
        assert_eq!(checksum(a), checksum(b));
    }

    #[test]
    fn test_checksum_at_selects_indices() {
        let symbols = [sym('Z'), sym('1'), sym('Z'), sym('2')];
        assert_eq!(checksum_at(&symbols, [1, 3]), sym('W'));
    }
}
