use crate::CodecError;
use crate::checksum::checksum_at;
use crate::identifier::{Identifier, Symbol};
use crate::layout::Layout;

/// Checks every checksum of an identifier.
///
/// Recomputes each parity level over its pattern and compares it with the
/// stored parity slot, then recomputes the overall checksum over the parity
/// slots and compares it with index 0. The identifier is valid only if every
/// comparison holds.
///
/// # Returns
///
/// `Ok(true)` or `Ok(false)` for any identifier whose length can be
/// partitioned, however many symbols are wrong. Fails only with
/// [`CodecError::MalformedIdentifier`].
pub fn verify(id: &Identifier) -> Result<bool, CodecError> {
    let layout = id.layout()?;
    Ok(holds(&layout, id.symbols()))
}

/// Checks `symbols` against an already validated layout.
#[inline]
pub(crate) fn holds(layout: &Layout, symbols: &[Symbol]) -> bool {
    mismatched_levels(layout, symbols).next().is_none() && overall_matches(layout, symbols)
}

/// Parity levels whose stored slot disagrees with the recomputed checksum.
pub(crate) fn mismatched_levels<'a>(
    layout: &'a Layout,
    symbols: &'a [Symbol],
) -> impl Iterator<Item = u32> + 'a {
    layout.levels().filter(move |&level| {
        checksum_at(symbols, layout.pattern(level)) != symbols[Layout::parity_slot(level)]
    })
}

#[inline]
pub(crate) fn overall_matches(layout: &Layout, symbols: &[Symbol]) -> bool {
    checksum_at(symbols, layout.parity_indices()) == symbols[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_str;

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_golden_verifies() {
        assert!(verify(&id("ZZW0Q123F456789A")).unwrap());
    }

    #[test]
    fn test_every_single_change_is_detected() {
        let original = encode_str(16, "0123456789A").unwrap();
        for index in 0..original.len() {
            for symbol in Symbol::all() {
                if Some(symbol) == original.get(index) {
                    continue;
                }
                let changed = original.with_substitution(index, symbol).unwrap();
                assert!(!verify(&changed).unwrap(), "undetected change at {index}");
            }
        }
    }

    #[test]
    fn test_overall_slot_checked() {
        // Parity slots intact, overall slot wrong.
        assert!(!verify(&id("0ZW0Q123F456789A")).unwrap());
    }

    #[test]
    fn test_malformed_length_rejected() {
        assert_eq!(
            verify(&id("Z")),
            Err(CodecError::MalformedIdentifier { len: 1 })
        );
        assert_eq!(
            verify(&id("")),
            Err(CodecError::MalformedIdentifier { len: 0 })
        );
    }

    #[test]
    fn test_garbage_of_valid_length_is_just_invalid() {
        assert_eq!(verify(&id("0000000000000000")), Ok(false));
    }

    #[test]
    fn test_mismatched_levels_for_data_error() {
        // Index 5 = 0b0101 sits in patterns 0 and 2.
        let bad = id("ZZW0Q223F456789A");
        let layout = bad.layout().unwrap();
        let levels: Vec<u32> = mismatched_levels(&layout, bad.symbols()).collect();
        assert_eq!(levels, vec![0, 2]);
        assert!(overall_matches(&layout, bad.symbols()));
    }
}
