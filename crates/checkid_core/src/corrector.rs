use crate::CodecError;
use crate::diagnosis::diagnose;
use crate::identifier::{Identifier, Symbol};
use crate::verifier::holds;
use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;

/// One pending branch of the correction search.
struct SearchState {
    /// Symbols with `depth` substitutions already applied.
    candidate: Vec<Symbol>,
    /// First suspect this branch may still substitute.
    cursor: usize,
    depth: usize,
}

/// Searches for identifiers within a few substitutions that verify.
///
/// Suspects from [`diagnose`] are visited in descending index order. Every
/// branch tries each alphabet symbol at each remaining suspect, keeps the
/// results that verify, and, while `depth < max_depth`, opens a deeper branch
/// from the substituted candidate restricted to the suspects after it. A
/// candidate therefore differs from `id` in at most `max_depth + 1`
/// positions, and every such combination of suspects is explored.
///
/// Cost grows as `32^(max_depth + 1)` times the number of suspect
/// combinations; [`checkid_common::limits::DEFAULT_MAX_DEPTH`] is the
/// conservative choice.
///
/// # Arguments
///
/// * `id` - The identifier as entered
/// * `max_depth` - Extra substitutions allowed beyond the first
///
/// # Returns
///
/// Verifying candidates, deduplicated and sorted. A valid `id` yields exactly
/// `[id]`. An empty list means nothing within reach verifies; more than one
/// means the correction is ambiguous. Fails only with
/// [`CodecError::MalformedIdentifier`].
pub fn correct(id: &Identifier, max_depth: usize) -> Result<Vec<Identifier>, CodecError> {
    let layout = id.layout()?;
    let suspects: Vec<usize> = diagnose(id)?.iter().rev().collect();
    if suspects.is_empty() {
        return Ok(vec![id.clone()]);
    }

    let mut found = BTreeSet::new();
    let mut stack = vec![SearchState {
        candidate: id.symbols().to_vec(),
        cursor: 0,
        depth: 0,
    }];

    while let Some(state) = stack.pop() {
        let mut candidate = state.candidate;
        for next in state.cursor..suspects.len() {
            let position = suspects[next];
            let original = candidate[position];
            let descend = state.depth < max_depth && next + 1 < suspects.len();

            for symbol in Symbol::all() {
                // Leaving a suspect unchanged is covered by the sibling branches.
                if symbol == original {
                    continue;
                }
                candidate[position] = symbol;
                if holds(&layout, &candidate) {
                    found.insert(Identifier::new(candidate.clone()));
                }
                if descend {
                    stack.push(SearchState {
                        candidate: candidate.clone(),
                        cursor: next + 1,
                        depth: state.depth + 1,
                    });
                }
            }
            candidate[position] = original;
        }
    }

    Ok(found.into_iter().collect())
}

/// What a correction attempt means for the person who entered the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    /// The identifier verifies as entered.
    Valid,
    /// Exactly one nearby identifier verifies.
    Corrected(Identifier),
    /// Several nearby identifiers verify; none can be preferred.
    Ambiguous(Vec<Identifier>),
    /// Nothing within the search depth verifies.
    Unrecognized,
}

impl Assessment {
    /// True when the outcome can be acted on without asking the user again.
    pub fn is_confident(&self) -> bool {
        matches!(self, Assessment::Valid | Assessment::Corrected(_))
    }

    /// The identifier to use, if there is exactly one.
    pub fn resolved<'a>(&'a self, entered: &'a Identifier) -> Option<&'a Identifier> {
        match self {
            Assessment::Valid => Some(entered),
            Assessment::Corrected(id) => Some(id),
            Assessment::Ambiguous(_) | Assessment::Unrecognized => None,
        }
    }
}

/// Runs [`correct`] and classifies the candidates.
pub fn assess(id: &Identifier, max_depth: usize) -> Result<Assessment, CodecError> {
    let mut candidates = correct(id, max_depth)?;
    Ok(match candidates.len() {
        0 => Assessment::Unrecognized,
        1 => {
            let only = candidates.remove(0);
            if only == *id {
                Assessment::Valid
            } else {
                Assessment::Corrected(only)
            }
        }
        _ => Assessment::Ambiguous(candidates),
    })
}
