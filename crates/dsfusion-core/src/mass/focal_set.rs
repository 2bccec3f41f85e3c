use std::fmt;

use serde::{Deserialize, Serialize};

use super::Hypothesis;
use crate::errors::MassError;

/// Canonical mass-function key: a sorted, duplicate-free, non-empty set of
/// hypotheses.
///
/// Every constructor funnels through the same canonicalization, so two focal
/// sets built from the same elements in any order compare and hash equal.
/// A bare hypothesis is the singleton set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Hypothesis>", into = "Vec<Hypothesis>")]
pub struct FocalSet(Vec<Hypothesis>);

impl FocalSet {
    /// Canonicalize an arbitrary collection of hypotheses.
    pub fn new<I, H>(elements: I) -> Result<Self, MassError>
    where
        I: IntoIterator<Item = H>,
        H: Into<Hypothesis>,
    {
        let mut hypotheses: Vec<Hypothesis> = elements.into_iter().map(Into::into).collect();
        if hypotheses.is_empty() {
            return Err(MassError::EmptyFocalSet);
        }
        hypotheses.sort();
        hypotheses.dedup();
        Ok(Self(hypotheses))
    }

    /// The singleton focal set `{h}`.
    pub fn singleton(h: impl Into<Hypothesis>) -> Self {
        Self(vec![h.into()])
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hypothesis> {
        self.0.iter()
    }

    /// Cardinality. Never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.0.len() == 1
    }

    pub fn contains(&self, h: &Hypothesis) -> bool {
        self.0.binary_search(h).is_ok()
    }

    /// Canonical intersection, or `None` when the sets are disjoint.
    pub fn intersect(&self, other: &FocalSet) -> Option<FocalSet> {
        let (mut i, mut j) = (0, 0);
        let mut common = Vec::new();
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    common.push(self.0[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        if common.is_empty() {
            None
        } else {
            Some(FocalSet(common))
        }
    }

    pub fn is_subset_of(&self, other: &FocalSet) -> bool {
        self.0.iter().all(|h| other.contains(h))
    }
}

impl fmt::Display for FocalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, h) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{h}")?;
        }
        f.write_str("}")
    }
}

impl TryFrom<Vec<Hypothesis>> for FocalSet {
    type Error = MassError;

    fn try_from(value: Vec<Hypothesis>) -> Result<Self, Self::Error> {
        FocalSet::new(value)
    }
}

impl From<FocalSet> for Vec<Hypothesis> {
    fn from(value: FocalSet) -> Self {
        value.0
    }
}

impl From<Hypothesis> for FocalSet {
    fn from(h: Hypothesis) -> Self {
        FocalSet::singleton(h)
    }
}

impl From<&str> for FocalSet {
    fn from(s: &str) -> Self {
        FocalSet::singleton(s)
    }
}
