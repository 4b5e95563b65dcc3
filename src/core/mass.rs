//! `MassFunction<E>` — a sparse map from focal elements to masses, with the
//! combinatorial operators of Dempster–Shafer theory.
//!
//! Generic over the element family through [`SetAlgebra`] (`core::family`);
//! the one concrete family shipped in this crate is `DiscreteElement`
//! (`core::element`). A handful of queries (`bet_p`, `max`,
//! `to_display_string`) need a notion of "atom" and of a canonical ordering
//! that the minimal capability set does not provide, so they are specialised
//! to `MassFunction<DiscreteElement>` rather than added to `SetAlgebra` —
//! see DESIGN.md.

use fxhash::FxHashMap;

use crate::core::element::DiscreteElement;
use crate::core::family::SetAlgebra;
use crate::core::reference_list::ReferenceList;
use crate::error::{DsError, DsResult};

/// Threshold below which a focal element's mass is dropped during
/// `normalise`.
const NORMALISE_DROP_EPS: f64 = 1e-12;

/// General numeric tolerance for equality/threshold comparisons elsewhere
/// (total-conflict detection, `isNormal`, pignistic denominators, ...).
const CMP_EPS: f64 = 1e-9;

/// A binary or n-ary combination rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinationRule {
    Dempster,
    Smets,
    Yager,
    Disjunctive,
    Averaging,
}

/// Which induced measure [`MassFunction::max`] should maximise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxKind {
    Belief,
    Plausibility,
    Commonality,
    Mass,
    BetP,
}

/// A finite map from focal elements to masses in `(0, 1]`, summing to 1 once
/// normalised. Mass on the empty element is permitted (Smets' variant).
#[derive(Debug, Clone)]
pub struct MassFunction<E: SetAlgebra> {
    n: usize,
    masses: FxHashMap<E, f64>,
}

impl<E: SetAlgebra> MassFunction<E> {
    /// An empty mass function (no focal elements yet) on an `n`-world frame.
    pub fn new(n: usize) -> Self {
        MassFunction {
            n,
            masses: FxHashMap::default(),
        }
    }

    /// Frame size this mass function is defined on.
    pub fn frame_size(&self) -> usize {
        self.n
    }

    /// Iterate the focal elements and their masses.
    pub fn focal_elements(&self) -> impl Iterator<Item = (&E, f64)> {
        self.masses.iter().map(|(e, &m)| (e, m))
    }

    /// Number of focal elements currently tracked (including any with a
    /// mass of exactly zero, which `normalise` will drop).
    pub fn focal_count(&self) -> usize {
        self.masses.len()
    }

    // -- Mutators (pre-freeze) -------------------------------------------

    /// Add `m` to the mass on `e`, accumulating if `e` is already a focal
    /// element. Rejects incompatible frames and non-finite or negative
    /// masses.
    pub fn add_mass(&mut self, e: E, m: f64) -> DsResult<()> {
        if e.frame_size() != self.n {
            return Err(DsError::IncompatiblePowerSet {
                frame_n: self.n,
                element_n: e.frame_size(),
            });
        }
        if !m.is_finite() || m < 0.0 {
            return Err(DsError::InvalidBeliefConstructor {
                reason: "mass must be a finite, non-negative number",
            });
        }
        *self.masses.entry(e).or_insert(0.0) += m;
        Ok(())
    }

    /// Remove a focal element entirely. Returns whether it was present.
    pub fn remove_mass(&mut self, e: &E) -> bool {
        self.masses.remove(e).is_some()
    }

    /// Drop focal elements whose mass is below `1e-12`, then rescale the
    /// remainder to sum to 1. Fails if the total pre-scale mass is itself
    /// below that epsilon.
    pub fn normalise(&mut self) -> DsResult<()> {
        self.masses.retain(|_, &mut m| m >= NORMALISE_DROP_EPS);
        let total: f64 = self.masses.values().sum();
        if total < NORMALISE_DROP_EPS {
            return Err(DsError::EmptyMassFunction);
        }
        for m in self.masses.values_mut() {
            *m /= total;
        }
        Ok(())
    }

    // -- Queries (no side effects) ----------------------------------------

    /// Mass assigned to `e`; `0.0` if it is not a focal element.
    pub fn mass(&self, e: &E) -> f64 {
        self.masses.get(e).copied().unwrap_or(0.0)
    }

    /// `Σ m(f)` for every focal `f ⊆ e`, `f ≠ ∅`.
    pub fn belief(&self, e: &E) -> DsResult<f64> {
        let mut total = 0.0;
        for (f, &m) in &self.masses {
            if f.is_empty_set() {
                continue;
            }
            if f.is_subset_of(e)? {
                total += m;
            }
        }
        Ok(total)
    }

    /// `Σ m(f)` for every focal `f` with `f ∩ e ≠ ∅`.
    pub fn plausibility(&self, e: &E) -> DsResult<f64> {
        let mut total = 0.0;
        for (f, &m) in &self.masses {
            if !f.intersection(e)?.is_empty_set() {
                total += m;
            }
        }
        Ok(total)
    }

    /// `Σ m(f)` for every focal `f ⊇ e`.
    pub fn commonality(&self, e: &E) -> DsResult<f64> {
        let mut total = 0.0;
        for (f, &m) in &self.masses {
            if e.is_subset_of(f)? {
                total += m;
            }
        }
        Ok(total)
    }

    /// `m(∅)`.
    pub fn conflict_mass(&self) -> f64 {
        self.mass(&E::empty(self.n))
    }

    /// The mass that would fall on `∅` if this function were conjunctively
    /// combined (Smets' rule) with itself — an internal-conflict score.
    pub fn self_conflict(&self) -> DsResult<f64> {
        Ok(self.combine_smets(self)?.conflict_mass())
    }

    /// No mass on `∅`.
    pub fn is_normal(&self) -> bool {
        self.conflict_mass() <= CMP_EPS
    }

    /// Some positive mass on `∅`.
    pub fn is_subnormal(&self) -> bool {
        !self.is_normal()
    }

    /// No mass on the full frame.
    pub fn is_dogmatic(&self) -> bool {
        self.mass(&E::complete(self.n)) <= CMP_EPS
    }

    /// All mass is on the full frame (the unique vacuous mass function).
    pub fn is_vacuous(&self) -> bool {
        let complete = E::complete(self.n);
        (self.mass(&complete) - 1.0).abs() <= CMP_EPS
            && self.masses.iter().all(|(f, &m)| m <= CMP_EPS || *f == complete)
    }

    /// Exactly one focal element.
    pub fn is_categorical(&self) -> bool {
        self.masses.values().filter(|&&m| m > CMP_EPS).count() == 1
    }

    /// At most two focal elements, one of them the full frame.
    pub fn is_simple(&self) -> bool {
        let complete = E::complete(self.n);
        let focals: Vec<&E> = self
            .masses
            .iter()
            .filter(|(_, &m)| m > CMP_EPS)
            .map(|(f, _)| f)
            .collect();
        focals.len() <= 2 && focals.iter().any(|&f| *f == complete)
    }

    /// Every focal element is an atom (cardinality 1).
    pub fn is_bayesian(&self) -> bool {
        self.masses
            .iter()
            .filter(|(_, &m)| m > CMP_EPS)
            .all(|(f, _)| f.cardinality() == 1)
    }

    /// `Σ m(f)/|f|` over non-empty focals; rejects a mass function carrying
    /// mass on `∅`.
    pub fn specificity(&self) -> DsResult<f64> {
        if self.conflict_mass() > CMP_EPS {
            return Err(DsError::EmptyElement);
        }
        let mut total = 0.0;
        for (f, &m) in &self.masses {
            if m <= 0.0 {
                continue;
            }
            let card = f.cardinality();
            if card == 0 {
                return Err(DsError::EmptyElement);
            }
            total += m / card as f64;
        }
        Ok(total)
    }

    // -- Operators ----------------------------------------------------------

    fn raw_conjunctive(&self, other: &Self) -> DsResult<FxHashMap<E, f64>> {
        if self.n != other.n {
            return Err(DsError::IncompatibleMassFunction {
                left: self.n,
                right: other.n,
            });
        }
        let mut out: FxHashMap<E, f64> = FxHashMap::default();
        out.reserve(self.masses.len() * other.masses.len());
        for (a, &ma) in &self.masses {
            for (b, &mb) in &other.masses {
                let c = a.intersection(b)?;
                *out.entry(c).or_insert(0.0) += ma * mb;
            }
        }
        Ok(out)
    }

    fn raw_disjunctive(&self, other: &Self) -> DsResult<FxHashMap<E, f64>> {
        if self.n != other.n {
            return Err(DsError::IncompatibleMassFunction {
                left: self.n,
                right: other.n,
            });
        }
        let mut out: FxHashMap<E, f64> = FxHashMap::default();
        out.reserve(self.masses.len() * other.masses.len());
        for (a, &ma) in &self.masses {
            for (b, &mb) in &other.masses {
                let c = a.union(b)?;
                *out.entry(c).or_insert(0.0) += ma * mb;
            }
        }
        Ok(out)
    }

    /// Dempster's rule: conjunctive combination, empty focal dropped, result
    /// renormalised by `1 / (1 - K)`. Fails on total conflict (`K = 1`).
    pub fn combine_dempster(&self, other: &Self) -> DsResult<Self> {
        let raw = self.raw_conjunctive(other)?;
        let empty = E::empty(self.n);
        let k = raw.get(&empty).copied().unwrap_or(0.0).max(0.0);
        if 1.0 - k <= CMP_EPS {
            return Err(DsError::CombinationUndefined {
                reason: "Dempster combination undefined: total conflict (K = 1)",
            });
        }
        let scale = 1.0 / (1.0 - k);
        let mut masses = FxHashMap::default();
        for (e, m) in raw {
            if e == empty {
                continue;
            }
            let v = (m * scale).max(0.0);
            if v > 0.0 {
                masses.insert(e, v);
            }
        }
        Ok(MassFunction { n: self.n, masses })
    }

    /// Smets' conjunctive rule: as Dempster but mass on `∅` is kept and the
    /// result is not renormalised.
    pub fn combine_smets(&self, other: &Self) -> DsResult<Self> {
        let raw = self.raw_conjunctive(other)?;
        let masses = raw
            .into_iter()
            .map(|(e, m)| (e, m.max(0.0)))
            .filter(|&(_, m)| m > 0.0)
            .collect();
        Ok(MassFunction { n: self.n, masses })
    }

    /// Yager's rule: as Smets, then the `∅`-mass is moved onto the full
    /// frame.
    pub fn combine_yager(&self, other: &Self) -> DsResult<Self> {
        let raw = self.raw_conjunctive(other)?;
        let empty = E::empty(self.n);
        let k = raw.get(&empty).copied().unwrap_or(0.0).max(0.0);
        let mut masses: FxHashMap<E, f64> = FxHashMap::default();
        for (e, m) in raw {
            if e == empty {
                continue;
            }
            let v = m.max(0.0);
            if v > 0.0 {
                *masses.entry(e).or_insert(0.0) += v;
            }
        }
        if k > 0.0 {
            *masses.entry(E::complete(self.n)).or_insert(0.0) += k;
        }
        Ok(MassFunction { n: self.n, masses })
    }

    /// The disjunctive (union) rule. No renormalisation; never produces
    /// mass on `∅` unless both operands already did.
    pub fn combine_disjunctive(&self, other: &Self) -> DsResult<Self> {
        let raw = self.raw_disjunctive(other)?;
        let masses = raw
            .into_iter()
            .map(|(e, m)| (e, m.max(0.0)))
            .filter(|&(_, m)| m > 0.0)
            .collect();
        Ok(MassFunction { n: self.n, masses })
    }

    /// Pointwise arithmetic mean of the two operands' masses.
    pub fn combine_averaging(&self, other: &Self) -> DsResult<Self> {
        if self.n != other.n {
            return Err(DsError::IncompatibleMassFunction {
                left: self.n,
                right: other.n,
            });
        }
        let mut masses: FxHashMap<E, f64> = self.masses.clone();
        for (e, &m) in &other.masses {
            *masses.entry(e.clone()).or_insert(0.0) += m;
        }
        for v in masses.values_mut() {
            *v /= 2.0;
        }
        masses.retain(|_, &mut v| v > 0.0);
        Ok(MassFunction { n: self.n, masses })
    }

    /// True n-ary arithmetic mean across the whole batch in a single pass
    /// (not a left fold of the pairwise average, which would not converge
    /// to the same value).
    fn average_many(list: &[Self]) -> DsResult<Self> {
        let n = list[0].n;
        for mf in list {
            if mf.n != n {
                return Err(DsError::IncompatibleMassFunction {
                    left: n,
                    right: mf.n,
                });
            }
        }
        let mut masses: FxHashMap<E, f64> = FxHashMap::default();
        for mf in list {
            for (e, &m) in &mf.masses {
                *masses.entry(e.clone()).or_insert(0.0) += m;
            }
        }
        let count = list.len() as f64;
        for v in masses.values_mut() {
            *v /= count;
        }
        masses.retain(|_, &mut v| v > 0.0);
        Ok(MassFunction { n, masses })
    }

    /// N-ary reduction by left fold (a single pass for [`CombinationRule::Averaging`]).
    /// Fails if fewer than two mass functions are given.
    pub fn combine(list: &[Self], rule: CombinationRule) -> DsResult<Self> {
        if list.len() < 2 {
            return Err(DsError::NotEnoughMassFunctions {
                needed: 2,
                got: list.len(),
            });
        }
        if rule == CombinationRule::Averaging {
            return Self::average_many(list);
        }
        let mut acc = list[0].clone();
        for mf in &list[1..] {
            acc = match rule {
                CombinationRule::Dempster => acc.combine_dempster(mf)?,
                CombinationRule::Smets => acc.combine_smets(mf)?,
                CombinationRule::Yager => acc.combine_yager(mf)?,
                CombinationRule::Disjunctive => acc.combine_disjunctive(mf)?,
                CombinationRule::Averaging => unreachable!("handled above"),
            };
        }
        Ok(acc)
    }

    /// Discount by `alpha ∈ [0, 1]`: every focal scaled by `1 - alpha`,
    /// plus `alpha` mass added onto the full frame.
    pub fn discount(&self, alpha: f64) -> DsResult<Self> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(DsError::InvalidBeliefConstructor {
                reason: "discount factor must be in [0, 1]",
            });
        }
        let mut masses: FxHashMap<E, f64> = self
            .masses
            .iter()
            .map(|(e, &m)| (e.clone(), m * (1.0 - alpha)))
            .filter(|&(_, m)| m > 0.0)
            .collect();
        if alpha > 0.0 {
            *masses.entry(E::complete(self.n)).or_insert(0.0) += alpha;
        }
        Ok(MassFunction { n: self.n, masses })
    }

    /// Weakening by `alpha ∈ [0, 1]`. The same transformation as
    /// [`MassFunction::discount`] — the source theory's "discounting" and
    /// "weakening" are the same operator in the normal case; see DESIGN.md.
    pub fn weaken(&self, alpha: f64) -> DsResult<Self> {
        self.discount(alpha)
    }

    /// Dempster's conditioning on a non-empty `e`: combine with the
    /// categorical mass function placing 1 on `e`.
    pub fn condition(&self, e: &E) -> DsResult<Self> {
        if e.is_empty_set() {
            return Err(DsError::EmptyElement);
        }
        let mut categorical = MassFunction::new(self.n);
        categorical.add_mass(e.clone(), 1.0)?;
        self.combine_dempster(&categorical)
    }

    /// Inverse of [`MassFunction::condition`]: given a mass function whose
    /// every focal is a subset of `e`, produce one on the whole frame whose
    /// conditioning by `e` returns the original. Each focal `f` is mapped to
    /// `f ∪ ¬e`.
    pub fn decondition(&self, e: &E) -> DsResult<Self> {
        if e.is_empty_set() {
            return Err(DsError::CombinationUndefined {
                reason: "deconditioning is undefined on the empty element",
            });
        }
        let not_e = e.complement();
        let mut masses = FxHashMap::default();
        for (f, &m) in &self.masses {
            if !f.is_subset_of(e)? {
                return Err(DsError::InvalidBeliefConstructor {
                    reason: "deconditioning requires every focal element to be a subset of e",
                });
            }
            let mapped = f.union(&not_e)?;
            *masses.entry(mapped).or_insert(0.0) += m;
        }
        Ok(MassFunction { n: self.n, masses })
    }
}

/// Queries and rendering that need an atom decomposition or a canonical
/// ordering — meaningful for bit-packed elements, not part of the minimal
/// `SetAlgebra` capability set.
impl MassFunction<DiscreteElement> {
    /// Pignistic probability: each focal's mass is distributed uniformly
    /// across its atoms, then the shares falling in `e` are summed. If
    /// `m(∅) > 0`, the result is normalised by `1 - m(∅)`.
    pub fn bet_p(&self, e: &DiscreteElement) -> DsResult<f64> {
        if e.n() != self.n {
            return Err(DsError::IncompatibleFrameSize {
                left: self.n,
                right: e.n(),
            });
        }
        let denom = 1.0 - self.conflict_mass();
        if denom <= CMP_EPS {
            return Err(DsError::EmptyMassFunction);
        }
        let mut total = 0.0;
        for (f, &m) in &self.masses {
            if m <= 0.0 || f.is_empty_set() {
                continue;
            }
            let card = f.cardinality() as f64;
            for k in 0..self.n {
                if f.contains(k) && e.contains(k) {
                    total += m / card;
                }
            }
        }
        Ok(total / denom)
    }

    /// Arg-max of the chosen induced measure over the focal elements. Ties
    /// break by cardinality ascending, then by bit-vector value ascending.
    pub fn max(&self, kind: MaxKind) -> DsResult<DiscreteElement> {
        if self.masses.is_empty() {
            return Err(DsError::EmptyMassFunction);
        }
        let mut best: Option<(DiscreteElement, f64)> = None;
        for (f, _) in &self.masses {
            let score = match kind {
                MaxKind::Belief => self.belief(f)?,
                MaxKind::Plausibility => self.plausibility(f)?,
                MaxKind::Commonality => self.commonality(f)?,
                MaxKind::Mass => self.mass(f),
                MaxKind::BetP => self.bet_p(f)?,
            };
            best = Some(match best {
                None => (f.clone(), score),
                Some((bf, bscore)) => {
                    if score > bscore + CMP_EPS {
                        (f.clone(), score)
                    } else if (score - bscore).abs() <= CMP_EPS {
                        if Self::breaks_tie(f, &bf) {
                            (f.clone(), score)
                        } else {
                            (bf, bscore)
                        }
                    } else {
                        (bf, bscore)
                    }
                }
            });
        }
        Ok(best.expect("checked non-empty above").0)
    }

    fn breaks_tie(candidate: &DiscreteElement, current_best: &DiscreteElement) -> bool {
        let (c1, c2) = (candidate.cardinality(), current_best.cardinality());
        match c1.cmp(&c2) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => {
                candidate.bit_vector_value() < current_best.bit_vector_value()
            }
        }
    }

    /// Render as a sequence of `mass : element` lines, one per focal, with
    /// the complete-frame focal (if present) printed last.
    pub fn to_display_string(&self, refs: &ReferenceList) -> DsResult<String> {
        let complete = DiscreteElement::complete(self.n);
        let mut lines: Vec<(DiscreteElement, f64)> =
            self.masses.iter().map(|(e, &m)| (e.clone(), m)).collect();
        lines.sort_by(|(a, _), (b, _)| {
            let a_last = *a == complete;
            let b_last = *b == complete;
            a_last
                .cmp(&b_last)
                .then_with(|| a.bit_vector_value().cmp(&b.bit_vector_value()))
        });
        let mut out = String::new();
        for (e, m) in lines {
            out.push_str(&format!("{:.6} : {}\n", m, e.to_display_string(refs)?));
        }
        Ok(out)
    }
}
