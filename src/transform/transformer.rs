//! `BeliefTransformer` — propagates named mass functions from their source
//! frames onto a shared destination frame.

use fxhash::FxHashMap;

use crate::core::{CombinationRule, DiscreteElement, MassFunction, ReferenceList, SetAlgebra};
use crate::error::{DsError, DsResult};
use crate::transform::refinement::Refinement;

/// Holds a destination frame and a library of named refinements, one per
/// source frame it knows how to propagate from.
#[derive(Debug, Clone)]
pub struct BeliefTransformer {
    destination: ReferenceList,
    refinements: FxHashMap<String, Refinement>,
}

impl BeliefTransformer {
    pub fn new(destination: ReferenceList) -> Self {
        BeliefTransformer {
            destination,
            refinements: FxHashMap::default(),
        }
    }

    pub fn destination(&self) -> &ReferenceList {
        &self.destination
    }

    /// Register a refinement under `name`. Fails if its destination frame
    /// size disagrees with this transformer's.
    pub fn register_refinement(
        &mut self,
        name: impl Into<String>,
        refinement: Refinement,
    ) -> DsResult<()> {
        if refinement.destination_n() != self.destination.size() {
            return Err(DsError::InvalidBeliefModel {
                reason: "refinement targets a destination frame of the wrong size".to_string(),
            });
        }
        self.refinements.insert(name.into(), refinement);
        Ok(())
    }

    /// Walk every loaded refinement and report the first one that fails to
    /// cover the destination frame disjointly.
    pub fn is_valid(&self) -> DsResult<()> {
        for (name, refinement) in &self.refinements {
            if !refinement.is_strict_and_covers_destination()? {
                return Err(DsError::InvalidBeliefModel {
                    reason: format!(
                        "refinement `{name}` does not cover the destination frame disjointly"
                    ),
                });
            }
        }
        Ok(())
    }

    fn vacuous_extend(
        &self,
        name: &str,
        input: &MassFunction<DiscreteElement>,
    ) -> DsResult<MassFunction<DiscreteElement>> {
        let refinement = self
            .refinements
            .get(name)
            .ok_or_else(|| DsError::ModelDoesNotExist {
                name: name.to_string(),
            })?;
        if refinement.source().size() != input.frame_size() {
            return Err(DsError::IncompatibleReferenceList {
                expected: refinement.source().size(),
                actual: input.frame_size(),
            });
        }
        let dest_n = self.destination.size();
        let mut out = MassFunction::new(dest_n);
        for (f, m) in input.focal_elements() {
            let mut image = DiscreteElement::empty(dest_n);
            for k in 0..input.frame_size() {
                if f.contains(k) {
                    image = image.union(refinement.image(k))?;
                }
            }
            out.add_mass(image, m)?;
        }
        Ok(out)
    }

    /// For each `(refinement name, mass function)` pair: vacuously extend
    /// the input onto the destination frame by mapping each focal to the
    /// union of its worlds' images. If more than one input is given, the
    /// extensions are conjunctively (Dempster) combined into a single
    /// destination mass function.
    pub fn transform(
        &self,
        inputs: &[(String, MassFunction<DiscreteElement>)],
    ) -> DsResult<MassFunction<DiscreteElement>> {
        if inputs.is_empty() {
            return Err(DsError::NotEnoughMassFunctions { needed: 1, got: 0 });
        }
        let mut extensions = Vec::with_capacity(inputs.len());
        for (name, mf) in inputs {
            extensions.push(self.vacuous_extend(name, mf)?);
        }
        if extensions.len() == 1 {
            return Ok(extensions.into_iter().next().expect("checked len == 1"));
        }
        MassFunction::combine(&extensions, CombinationRule::Dempster)
    }

    /// Inverse of vacuous extension: map each destination focal to the
    /// union of source worlds whose image intersects it.
    pub fn marginalise(
        &self,
        name: &str,
        destination_mass: &MassFunction<DiscreteElement>,
    ) -> DsResult<MassFunction<DiscreteElement>> {
        let refinement = self
            .refinements
            .get(name)
            .ok_or_else(|| DsError::ModelDoesNotExist {
                name: name.to_string(),
            })?;
        let source_n = refinement.source().size();
        let mut out = MassFunction::new(source_n);
        for (f, m) in destination_mass.focal_elements() {
            let mut preimage = DiscreteElement::empty(source_n);
            for k in 0..source_n {
                if !refinement.image(k).intersection(f)?.is_empty_set() {
                    preimage = preimage.union(&DiscreteElement::atom(source_n, k)?)?;
                }
            }
            out.add_mass(preimage, m)?;
        }
        Ok(out)
    }
}
