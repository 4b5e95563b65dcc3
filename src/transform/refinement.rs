//! `Refinement` — a mapping from each world of a source frame to a non-empty
//! subset of a destination frame, the mechanism belief propagation composes.

use crate::core::{DiscreteElement, ReferenceList, SetAlgebra};
use crate::error::{DsError, DsResult};

/// Source frame plus, for each of its worlds, the destination-frame element
/// it refines to.
#[derive(Debug, Clone)]
pub struct Refinement {
    source: ReferenceList,
    images: Vec<DiscreteElement>,
}

impl Refinement {
    /// Build a refinement from a source frame and one destination image per
    /// source world, in source world-index order. Rejects an image count
    /// mismatch or any empty image.
    pub fn new(source: ReferenceList, images: Vec<DiscreteElement>) -> DsResult<Self> {
        if images.len() != source.size() {
            return Err(DsError::InvalidBeliefModel {
                reason: "one destination image is required per source world".to_string(),
            });
        }
        let dest_n = images.first().map(|e| e.n());
        for image in &images {
            if image.is_empty_set() {
                return Err(DsError::InvalidBeliefModel {
                    reason: "a refinement image must be non-empty".to_string(),
                });
            }
            if Some(image.n()) != dest_n {
                return Err(DsError::InvalidBeliefModel {
                    reason: "every image must share the same destination frame size".to_string(),
                });
            }
        }
        Ok(Refinement { source, images })
    }

    pub fn source(&self) -> &ReferenceList {
        &self.source
    }

    /// Size of the destination frame this refinement targets, or 0 for a
    /// (degenerate) zero-world source frame.
    pub fn destination_n(&self) -> usize {
        self.images.first().map(|e| e.n()).unwrap_or(0)
    }

    pub fn image(&self, source_world: usize) -> &DiscreteElement {
        &self.images[source_world]
    }

    /// Strict-refinement validity: the images cover the full destination
    /// frame and are pairwise disjoint. A multi-valued refinement relaxes
    /// the disjointness half of this check; this crate only models the
    /// strict case.
    pub fn is_strict_and_covers_destination(&self) -> DsResult<bool> {
        let n = self.destination_n();
        if n == 0 {
            return Ok(true);
        }
        let mut union = DiscreteElement::empty(n);
        for image in &self.images {
            union = union.union(image)?;
        }
        if union != DiscreteElement::complete(n) {
            return Ok(false);
        }
        for i in 0..self.images.len() {
            for j in (i + 1)..self.images.len() {
                if !self.images[i].intersection(&self.images[j])?.is_empty_set() {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(n: usize, bits: u64) -> DiscreteElement {
        DiscreteElement::from_bits(n, bits).unwrap()
    }

    #[test]
    fn rejects_wrong_image_count() {
        let source = ReferenceList::new(["sitting", "standing"]).unwrap();
        assert!(Refinement::new(source, vec![el(3, 0b011)]).is_err());
    }

    #[test]
    fn rejects_empty_image() {
        let source = ReferenceList::new(["sitting", "standing"]).unwrap();
        let images = vec![DiscreteElement::empty(3), el(3, 0b100)];
        assert!(Refinement::new(source, images).is_err());
    }

    #[test]
    fn strict_refinement_covers_and_is_disjoint() {
        let source = ReferenceList::new(["sitting", "standing"]).unwrap();
        let images = vec![el(3, 0b011), el(3, 0b100)];
        let refinement = Refinement::new(source, images).unwrap();
        assert!(refinement.is_strict_and_covers_destination().unwrap());
    }

    #[test]
    fn overlapping_images_are_not_strict() {
        let source = ReferenceList::new(["sitting", "standing"]).unwrap();
        let images = vec![el(3, 0b011), el(3, 0b110)];
        let refinement = Refinement::new(source, images).unwrap();
        assert!(!refinement.is_strict_and_covers_destination().unwrap());
    }
}
