//! `ReferenceList` — ordered, duplicate-free naming of the worlds of a frame.

use fxhash::FxHashMap;

use crate::error::{DsError, DsResult};

/// The ordered sequence of world names for a frame of discernment. Used only
/// to decorate output and to assert compatibility of frames named at the
/// boundaries — no arithmetic operation in `core::mass` depends on it.
#[derive(Debug, Clone)]
pub struct ReferenceList {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl ReferenceList {
    /// Build a reference list from an ordered sequence of world names.
    /// Rejects duplicate or empty names.
    pub fn new<I, S>(names: I) -> DsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = FxHashMap::default();
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(DsError::InvalidBeliefConstructor {
                    reason: "reference list contains an empty name",
                });
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(DsError::InvalidBeliefConstructor {
                    reason: "reference list contains a duplicate name",
                });
            }
        }
        Ok(ReferenceList { names, index })
    }

    /// Whether `name` is one of the worlds in this list.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The world index of `name`, or `None` if absent.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Number of worlds.
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// The world names, in frame order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl PartialEq for ReferenceList {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for ReferenceList {}
