//! `DiscreteSet` — an unordered, duplicate-free collection of
//! [`DiscreteElement`]s sharing a common frame size.

use fxhash::FxHashSet;

use crate::core::element::DiscreteElement;
use crate::core::family::SetAlgebra;
use crate::error::{DsError, DsResult};

/// A duplicate-free collection of `DiscreteElement`s on a common `n`-world
/// frame. Enumeration order is unspecified but stable within one instance's
/// lifetime.
#[derive(Debug, Clone)]
pub struct DiscreteSet {
    n: usize,
    elements: Vec<DiscreteElement>,
    seen: FxHashSet<DiscreteElement>,
}

impl DiscreteSet {
    /// An empty set on an `n`-world frame.
    pub fn new(n: usize) -> Self {
        DiscreteSet {
            n,
            elements: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Insert `e`. Returns `Ok(true)` if it was newly added, `Ok(false)` if
    /// it was already present. Fails if `e` is not on this set's frame.
    pub fn add(&mut self, e: DiscreteElement) -> DsResult<bool> {
        if e.n() != self.n {
            return Err(DsError::IncompatibleFrameSize {
                left: self.n,
                right: e.n(),
            });
        }
        if self.seen.contains(&e) {
            return Ok(false);
        }
        self.seen.insert(e.clone());
        self.elements.push(e);
        Ok(true)
    }

    /// Remove `e`. Returns whether it was present.
    pub fn remove(&mut self, e: &DiscreteElement) -> bool {
        if !self.seen.remove(e) {
            return false;
        }
        self.elements.retain(|x| x != e);
        true
    }

    /// Whether `e` is a member of this set.
    pub fn contains(&self, e: &DiscreteElement) -> bool {
        self.seen.contains(e)
    }

    /// Number of elements in the set.
    pub fn cardinality(&self) -> usize {
        self.elements.len()
    }

    /// Frame size shared by every element in this set.
    pub fn frame_size(&self) -> usize {
        self.n
    }

    /// Iterate the elements, in this instance's stable (but otherwise
    /// unspecified) order.
    pub fn iter(&self) -> impl Iterator<Item = &DiscreteElement> {
        self.elements.iter()
    }

    /// The `n` singletons of an `n`-world frame.
    pub fn generate_atoms(n: usize) -> Self {
        let mut set = DiscreteSet::new(n);
        for k in 0..n {
            set.add(DiscreteElement::atom(n, k).expect("k < n by construction"))
                .expect("frame size matches by construction");
        }
        set
    }

    /// All `2^n` subsets of an `n`-world frame. `n` beyond ~20 is
    /// impractical (2^20 elements materialised); the library does not
    /// impose a hard cap below the machine word width — observing that
    /// restraint is the caller's responsibility.
    pub fn generate_power_set(n: usize) -> Self {
        let mut set = DiscreteSet::new(n);
        // `n` can legally reach (and exceed) 64, so the subset count itself
        // must be computed in a wider type than the single machine word a
        // `DiscreteElement` bitmap uses: `1u64 << 64` overflows.
        let count: u128 = 1u128 << n;
        for bits in 0..count {
            let elem = if n <= 64 {
                // `from_bits` takes a single `u64` word, so it covers every
                // frame up to 64 worlds directly.
                DiscreteElement::from_bits(n, bits as u64).expect("bits fit n by construction")
            } else {
                // n > 64: a bitmap no longer fits one machine word, so build
                // the element atom-by-atom instead.
                let mut e = DiscreteElement::empty(n);
                for k in 0..n {
                    if (bits >> k) & 1 == 1 {
                        e = e
                            .union(&DiscreteElement::atom(n, k).expect("k < n"))
                            .expect("same frame");
                    }
                }
                e
            };
            set.add(elem).expect("frame size matches by construction");
        }
        set
    }

    /// All elements of the power set of `e`'s frame that are supersets of
    /// `e`. O(2^n): iterates the whole power set and filters.
    pub fn supersets_of(e: &DiscreteElement) -> DsResult<DiscreteSet> {
        let power_set = DiscreteSet::generate_power_set(e.n());
        let mut out = DiscreteSet::new(e.n());
        for candidate in power_set.iter() {
            if e.is_subset_of(candidate)? {
                out.add(candidate.clone())?;
            }
        }
        Ok(out)
    }

    /// All elements of the power set of `e`'s frame that are subsets of
    /// `e`. O(2^n): iterates the whole power set and filters.
    pub fn subsets_of(e: &DiscreteElement) -> DsResult<DiscreteSet> {
        let power_set = DiscreteSet::generate_power_set(e.n());
        let mut out = DiscreteSet::new(e.n());
        for candidate in power_set.iter() {
            if candidate.is_subset_of(e)? {
                out.add(candidate.clone())?;
            }
        }
        Ok(out)
    }
}
