use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use core::fmt;

/// Positions of one identifier that the diagnoser considers possibly wrong.
///
/// One bit per identifier position. The set is a superset heuristic: a single
/// wrong symbol is always inside it, but it usually flags correct positions
/// too.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SuspectSet {
    bits: BitVec<usize, Lsb0>,
}

impl SuspectSet {
    /// Creates an empty set for an identifier of length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, len),
        }
    }

    /// Flags `index`. Indices outside the identifier are ignored.
    #[inline]
    pub fn insert(&mut self, index: usize) {
        if let Some(mut bit) = self.bits.get_mut(index) {
            *bit = true;
        }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).is_some_and(|bit| *bit)
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Length of the identifier the set was built for.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Flagged positions in ascending order; `.rev()` gives descending.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    pub fn to_vec(&self) -> alloc::vec::Vec<usize> {
        self.iter().collect()
    }
}

impl Extend<usize> for SuspectSet {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for index in iter {
            self.insert(index);
        }
    }
}

impl fmt::Debug for SuspectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
