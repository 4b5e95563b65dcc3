//! `DiscreteElement` — a subset of an `n`-world frame as a packed bit-vector.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::{smallvec, SmallVec};

use crate::core::family::SetAlgebra;
use crate::core::reference_list::ReferenceList;
use crate::error::{DsError, DsResult};

/// Inline capacity for the bit-vector: one machine word covers every frame
/// up to 64 worlds without spilling to the heap.
type Words = SmallVec<[u64; 2]>;

fn word_count(n: usize) -> usize {
    n.div_ceil(64)
}

/// Zero every bit at index >= n in the last word, preserving the invariant
/// that bits beyond the frame size are always zero.
fn mask_tail(words: &mut [u64], n: usize) {
    let Some(last) = words.len().checked_sub(1) else {
        return;
    };
    let bits_in_last = n - last * 64;
    let mask = if bits_in_last >= 64 {
        u64::MAX
    } else {
        (1u64 << bits_in_last) - 1
    };
    words[last] &= mask;
}

/// A subset of a finite frame of discernment, as a bit-vector with a lazily
/// computed, memoised cardinality.
#[derive(Debug, Clone)]
pub struct DiscreteElement {
    n: usize,
    words: Words,
    cardinality: Cell<Option<u32>>,
}

impl DiscreteElement {
    /// The empty subset ∅ of an `n`-world frame.
    pub fn empty(n: usize) -> Self {
        DiscreteElement {
            n,
            words: smallvec![0u64; word_count(n)],
            cardinality: Cell::new(Some(0)),
        }
    }

    /// The full frame Ω.
    pub fn complete(n: usize) -> Self {
        let mut words: Words = smallvec![u64::MAX; word_count(n)];
        mask_tail(&mut words, n);
        DiscreteElement {
            n,
            words,
            cardinality: Cell::new(Some(n as u32)),
        }
    }

    /// The singleton `{k}` of an `n`-world frame. `k` must be `< n`.
    pub fn atom(n: usize, k: usize) -> DsResult<Self> {
        if k >= n {
            return Err(DsError::InvalidBeliefConstructor {
                reason: "atom index out of range",
            });
        }
        let mut words: Words = smallvec![0u64; word_count(n)];
        words[k / 64] |= 1u64 << (k % 64);
        Ok(DiscreteElement {
            n,
            words,
            cardinality: Cell::new(Some(1)),
        })
    }

    /// Construct an element from a single-word bitmap. Fails if any bit at
    /// position `>= n` is set.
    pub fn from_bits(n: usize, bits: u64) -> DsResult<Self> {
        let wc = word_count(n);
        if wc == 0 {
            return if bits == 0 {
                Ok(DiscreteElement::empty(n))
            } else {
                Err(DsError::InvalidBeliefConstructor {
                    reason: "bits set outside of a zero-world frame",
                })
            };
        }
        let mut words: Words = smallvec![0u64; wc];
        words[0] = bits;
        if wc == 1 {
            let before = words[0];
            mask_tail(&mut words, n);
            if words[0] != before {
                return Err(DsError::InvalidBeliefConstructor {
                    reason: "bits set at a position >= n",
                });
            }
        }
        Ok(DiscreteElement {
            n,
            words,
            cardinality: Cell::new(None),
        })
    }

    /// The canonical integer-bitmap representation, valid only for `n <= 32`
    /// per the external-interface contract.
    pub fn to_integer(&self) -> DsResult<u32> {
        if self.n > 32 {
            return Err(DsError::ElementTooBigForInteger {
                needed: self.n,
                limit: 32,
            });
        }
        Ok(self.words.first().copied().unwrap_or(0) as u32)
    }

    /// Frame size this element is defined on.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Whether world `k` is a member of this subset.
    pub fn contains(&self, k: usize) -> bool {
        if k >= self.n {
            return false;
        }
        (self.words[k / 64] >> (k % 64)) & 1 == 1
    }

    fn check_compatible(&self, other: &Self) -> DsResult<()> {
        if self.n != other.n {
            return Err(DsError::IncompatibleFrameSize {
                left: self.n,
                right: other.n,
            });
        }
        Ok(())
    }

    fn zip_words(&self, other: &Self, f: impl Fn(u64, u64) -> u64) -> Words {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(&a, &b)| f(a, b))
            .collect()
    }

    /// `a ⊊ b`: a proper subset of b.
    pub fn is_proper_subset_of(&self, other: &Self) -> DsResult<bool> {
        Ok(self.is_subset_of(other)? && self != other)
    }

    /// A canonical, magnitude-ordered key for tie-breaking: the words in
    /// most-significant-first order, comparable lexicographically.
    pub fn bit_vector_value(&self) -> Vec<u64> {
        self.words.iter().rev().copied().collect()
    }

    /// Render as `{name_i, name_j, …}` in ascending world-index order, `∅`
    /// for the empty element, `Ω` for the complete element.
    pub fn to_display_string(&self, refs: &ReferenceList) -> DsResult<String> {
        if refs.size() != self.n {
            return Err(DsError::IncompatibleReferenceList {
                expected: self.n,
                actual: refs.size(),
            });
        }
        if self.is_empty_set() {
            return Ok("∅".to_string());
        }
        if *self == DiscreteElement::complete(self.n) {
            return Ok("Ω".to_string());
        }
        let names: Vec<&str> = (0..self.n)
            .filter(|&k| self.contains(k))
            .map(|k| refs.names()[k].as_str())
            .collect();
        Ok(format!("{{{}}}", names.join(", ")))
    }
}

impl SetAlgebra for DiscreteElement {
    fn empty(n: usize) -> Self {
        DiscreteElement::empty(n)
    }

    fn complete(n: usize) -> Self {
        DiscreteElement::complete(n)
    }

    fn frame_size(&self) -> usize {
        self.n
    }

    fn union(&self, other: &Self) -> DsResult<Self> {
        self.check_compatible(other)?;
        Ok(DiscreteElement {
            n: self.n,
            words: self.zip_words(other, |a, b| a | b),
            cardinality: Cell::new(None),
        })
    }

    fn intersection(&self, other: &Self) -> DsResult<Self> {
        self.check_compatible(other)?;
        Ok(DiscreteElement {
            n: self.n,
            words: self.zip_words(other, |a, b| a & b),
            cardinality: Cell::new(None),
        })
    }

    fn difference(&self, other: &Self) -> DsResult<Self> {
        self.check_compatible(other)?;
        Ok(DiscreteElement {
            n: self.n,
            words: self.zip_words(other, |a, b| a & !b),
            cardinality: Cell::new(None),
        })
    }

    fn complement(&self) -> Self {
        let mut words: Words = self.words.iter().map(|&w| !w).collect();
        mask_tail(&mut words, self.n);
        DiscreteElement {
            n: self.n,
            words,
            cardinality: Cell::new(self.cardinality.get().map(|c| self.n as u32 - c)),
        }
    }

    fn is_subset_of(&self, other: &Self) -> DsResult<bool> {
        self.check_compatible(other)?;
        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .all(|(&a, &b)| a & !b == 0))
    }

    fn cardinality(&self) -> u32 {
        if let Some(c) = self.cardinality.get() {
            return c;
        }
        let c = self.words.iter().map(|w| w.count_ones()).sum();
        self.cardinality.set(Some(c));
        c
    }
}

impl PartialEq for DiscreteElement {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.words == other.words
    }
}

impl Eq for DiscreteElement {}

impl Hash for DiscreteElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.n.hash(state);
        self.words.hash(state);
    }
}

impl fmt::Display for DiscreteElement {
    /// Debug-only rendering without a reference list (world indices, not
    /// names). Use [`DiscreteElement::to_display_string`] for the named
    /// textual form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty_set() {
            return write!(f, "∅");
        }
        let idxs: Vec<String> = (0..self.n)
            .filter(|&k| self.contains(k))
            .map(|k| k.to_string())
            .collect();
        write!(f, "{{{}}}", idxs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_matches_popcount() {
        let e = DiscreteElement::from_bits(5, 0b01011).unwrap();
        assert_eq!(e.cardinality(), 3);
        assert_eq!(e.complement().cardinality(), 2);
    }

    #[test]
    fn complement_union_is_complete_and_intersection_empty() {
        let n = 5;
        let e = DiscreteElement::from_bits(n, 0b01011).unwrap();
        let c = e.complement();
        assert_eq!(e.union(&c).unwrap(), DiscreteElement::complete(n));
        assert_eq!(e.intersection(&c).unwrap(), DiscreteElement::empty(n));
    }

    #[test]
    fn from_bits_rejects_out_of_range_bits() {
        assert!(DiscreteElement::from_bits(3, 0b1000).is_err());
        assert!(DiscreteElement::from_bits(3, 0b0111).is_ok());
    }

    #[test]
    fn atom_rejects_out_of_range_index() {
        assert!(DiscreteElement::atom(4, 4).is_err());
        assert!(DiscreteElement::atom(4, 3).is_ok());
    }

    #[test]
    fn incompatible_frame_size_is_an_error() {
        let a = DiscreteElement::empty(3);
        let b = DiscreteElement::empty(4);
        assert!(a.union(&b).is_err());
    }

    #[test]
    fn to_integer_rejects_large_frames() {
        let e = DiscreteElement::empty(33);
        assert!(e.to_integer().is_err());
        let small = DiscreteElement::complete(8);
        assert_eq!(small.to_integer().unwrap(), 0xff);
    }
}
