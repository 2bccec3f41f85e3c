use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FocalSet, Hypothesis};
use crate::constants::{CONFLICT_EPSILON, PROBABILITY_TOLERANCE};
use crate::errors::{CombinationError, MassError};

/// Basic belief assignment: canonical focal set → non-negative mass.
///
/// After normalization the masses sum to 1.0 (within `PROBABILITY_TOLERANCE`).
/// Intermediate results inside a combination rule may not.
/// Iteration order is the canonical focal-set order, so every rule is
/// deterministic for a given input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MassEntry>", into = "Vec<MassEntry>")]
pub struct MassFunction {
    masses: BTreeMap<FocalSet, f64>,
}

/// Serialized form of one mass-function entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassEntry {
    pub focal: FocalSet,
    pub mass: f64,
}

impl MassFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(focal set, mass)` pairs. Later duplicates overwrite earlier ones.
    pub fn try_from_entries<I>(entries: I) -> Result<Self, MassError>
    where
        I: IntoIterator<Item = (FocalSet, f64)>,
    {
        let mut mf = Self::new();
        for (focal, mass) in entries {
            mf.insert(focal, mass)?;
        }
        Ok(mf)
    }

    /// A mass function tracking `focal_sets`, every one at zero mass.
    pub fn zeroed<'a, I>(focal_sets: I) -> Self
    where
        I: IntoIterator<Item = &'a FocalSet>,
    {
        Self {
            masses: focal_sets.into_iter().map(|f| (f.clone(), 0.0)).collect(),
        }
    }

    /// Assign `mass` to `focal`, returning the previous mass if it was tracked.
    pub fn insert(&mut self, focal: FocalSet, mass: f64) -> Result<Option<f64>, MassError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(MassError::InvalidMass {
                focal: focal.to_string(),
                mass,
            });
        }
        Ok(self.masses.insert(focal, mass))
    }

    /// Mass of `focal`; untracked focal sets carry zero.
    pub fn get(&self, focal: &FocalSet) -> f64 {
        self.masses.get(focal).copied().unwrap_or(0.0)
    }

    pub fn get_mut(&mut self, focal: &FocalSet) -> Option<&mut f64> {
        self.masses.get_mut(focal)
    }

    pub fn contains(&self, focal: &FocalSet) -> bool {
        self.masses.contains_key(focal)
    }

    pub fn remove(&mut self, focal: &FocalSet) -> Option<f64> {
        self.masses.remove(focal)
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FocalSet, f64> {
        self.masses.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, FocalSet, f64> {
        self.masses.iter_mut()
    }

    pub fn focal_sets(&self) -> btree_map::Keys<'_, FocalSet, f64> {
        self.masses.keys()
    }

    /// Sum of all masses.
    pub fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Every hypothesis mentioned by any tracked focal set.
    pub fn hypotheses(&self) -> BTreeSet<Hypothesis> {
        self.masses
            .keys()
            .flat_map(|f| f.iter().cloned())
            .collect()
    }

    /// The first tracked focal set with the greatest cardinality.
    pub fn largest_focal_set(&self) -> Option<&FocalSet> {
        let mut best: Option<&FocalSet> = None;
        for focal in self.masses.keys() {
            if best.map_or(true, |b| focal.len() > b.len()) {
                best = Some(focal);
            }
        }
        best
    }

    /// Divide every mass by the total.
    ///
    /// Fails with `ConflictExhaustion` when the total is zero: every pairing
    /// conflicted and there is nothing left to redistribute.
    pub fn normalized(&self) -> Result<Self, CombinationError> {
        let total = self.total();
        if !total.is_finite() || total <= CONFLICT_EPSILON {
            return Err(CombinationError::ConflictExhaustion { total });
        }
        Ok(Self {
            masses: self
                .masses
                .iter()
                .map(|(f, m)| (f.clone(), m / total))
                .collect(),
        })
    }

    /// Clamp every mass into [0, 1] to absorb rounding drift.
    pub fn clamped(mut self) -> Self {
        for mass in self.masses.values_mut() {
            *mass = mass.clamp(0.0, 1.0);
        }
        self
    }

    /// Whether the masses sum to one within `PROBABILITY_TOLERANCE`.
    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= PROBABILITY_TOLERANCE
    }

    /// Entry-wise comparison over the union of tracked focal sets.
    pub fn approx_eq(&self, other: &MassFunction, tolerance: f64) -> bool {
        self.masses
            .keys()
            .chain(other.masses.keys())
            .all(|f| (self.get(f) - other.get(f)).abs() <= tolerance)
    }
}

impl fmt::Display for MassFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, (focal, mass)) in self.masses.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{focal}={mass:.4}")?;
        }
        f.write_str("]")
    }
}

impl<'a> IntoIterator for &'a MassFunction {
    type Item = (&'a FocalSet, &'a f64);
    type IntoIter = btree_map::Iter<'a, FocalSet, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.masses.iter()
    }
}

impl TryFrom<Vec<MassEntry>> for MassFunction {
    type Error = MassError;

    fn try_from(entries: Vec<MassEntry>) -> Result<Self, Self::Error> {
        MassFunction::try_from_entries(entries.into_iter().map(|e| (e.focal, e.mass)))
    }
}

impl From<MassFunction> for Vec<MassEntry> {
    fn from(mf: MassFunction) -> Self {
        mf.masses
            .into_iter()
            .map(|(focal, mass)| MassEntry { focal, mass })
            .collect()
    }
}
