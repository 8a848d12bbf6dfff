use crate::CodecError;
use crate::identifier::Identifier;
use crate::layout::Layout;
use crate::suspects::SuspectSet;
use crate::verifier::{mismatched_levels, overall_matches};

/// Localizes the positions that may hold transcription errors.
///
/// Every parity level whose checksum disagrees with its slot flags the slot
/// and every position in its pattern. A disagreeing overall checksum flags
/// index 0 and every parity slot. A single wrong data symbol at index `d`
/// breaks exactly the levels for the bits set in `d`, so `d` is always
/// flagged; several errors at once can flag positions that are fine.
///
/// The checks only read the identifier, so a single pass is final: nothing
/// flagged here could be cleared by checking again.
///
/// # Returns
///
/// The suspect set, empty exactly when the identifier verifies. Fails only
/// with [`CodecError::MalformedIdentifier`].
pub fn diagnose(id: &Identifier) -> Result<SuspectSet, CodecError> {
    let layout = id.layout()?;
    let symbols = id.symbols();
    let mut suspects = SuspectSet::new(layout.len());

    for level in mismatched_levels(&layout, symbols) {
        suspects.insert(Layout::parity_slot(level));
        suspects.extend(layout.pattern(level));
    }

    if !overall_matches(&layout, symbols) {
        suspects.insert(0);
        suspects.extend(layout.parity_indices());
    }

    Ok(suspects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Symbol, encode_str, verify};

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_valid_identifier_has_no_suspects() {
        assert!(diagnose(&id("ZZW0Q123F456789A")).unwrap().is_empty());
    }

    #[test]
    fn test_data_error_flags_covering_levels() {
        let suspects = diagnose(&id("ZZW0Q223F456789A")).unwrap();
        assert_eq!(
            suspects.to_vec(),
            vec![1, 3, 4, 5, 6, 7, 9, 11, 12, 13, 14, 15]
        );
    }

    #[test]
    fn test_overall_error_flags_parity_slots() {
        let suspects = diagnose(&id("0ZW0Q123F456789A")).unwrap();
        assert_eq!(suspects.to_vec(), vec![0, 1, 2, 4, 8]);
    }

    #[test]
    fn test_parity_error_flags_its_level_and_overall() {
        // Slot 2 changed: level 1 and the overall checksum both disagree.
        let suspects = diagnose(&id("ZZX0Q123F456789A")).unwrap();
        assert!(suspects.contains(0));
        assert!(suspects.contains(2));
        for j in [3, 6, 7, 10, 11, 14, 15] {
            assert!(suspects.contains(j));
        }
    }

    #[test]
    fn test_every_single_change_is_flagged() {
        let original = encode_str(20, "QRSUVWXYZ01234").unwrap();
        assert!(verify(&original).unwrap());
        for index in 0..original.len() {
            for symbol in Symbol::all() {
                if Some(symbol) == original.get(index) {
                    continue;
                }
                let changed = original.with_substitution(index, symbol).unwrap();
                let suspects = diagnose(&changed).unwrap();
                assert!(suspects.contains(index), "index {index} not flagged");
            }
        }
    }

    #[test]
    fn test_malformed_length_rejected() {
        assert_eq!(
            diagnose(&id("A")),
            Err(CodecError::MalformedIdentifier { len: 1 })
        );
    }
}
