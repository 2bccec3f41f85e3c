//! Evidence batches and per-item reliability weights.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EVIDENCE_WEIGHT, ZERO_WEIGHT_DELTA};
use crate::errors::MassError;
use crate::mass::MassFunction;

/// Identifies one observation inside a batch: a sequence index or a sensor name.
///
/// Ordering is numeric among indices and lexical among names; every index
/// sorts before every name. The overwrite rule treats the greatest key as
/// the most recent observation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvidenceKey {
    Index(u64),
    Name(String),
}

impl fmt::Display for EvidenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}

impl From<u64> for EvidenceKey {
    fn from(i: u64) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for EvidenceKey {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for EvidenceKey {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

/// One or more simultaneous observations, kept in insertion order.
///
/// Insertion order is the fold order for the sequential rules. Re-inserting
/// an existing key replaces its mass function in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBatch {
    items: Vec<(EvidenceKey, MassFunction)>,
}

impl EvidenceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<EvidenceKey>, mass: MassFunction) {
        let key = key.into();
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = mass,
            None => self.items.push((key, mass)),
        }
    }

    /// Builder form of [`EvidenceBatch::insert`].
    pub fn with(mut self, key: impl Into<EvidenceKey>, mass: MassFunction) -> Self {
        self.insert(key, mass);
        self
    }

    pub fn get(&self, key: &EvidenceKey) -> Option<&MassFunction> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, m)| m)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EvidenceKey, &MassFunction)> {
        self.items.iter().map(|(k, m)| (k, m))
    }

    pub fn keys(&self) -> impl Iterator<Item = &EvidenceKey> {
        self.items.iter().map(|(k, _)| k)
    }

    /// The entry with the greatest key, i.e. the newest observation.
    pub fn newest(&self) -> Option<(&EvidenceKey, &MassFunction)> {
        self.iter().max_by(|a, b| a.0.cmp(b.0))
    }
}

impl<K: Into<EvidenceKey>> FromIterator<(K, MassFunction)> for EvidenceBatch {
    fn from_iter<T: IntoIterator<Item = (K, MassFunction)>>(iter: T) -> Self {
        let mut batch = EvidenceBatch::new();
        for (k, m) in iter {
            batch.insert(k, m);
        }
        batch
    }
}

/// Reliability weights keyed like the batch they accompany.
///
/// Items without an explicit entry weigh `DEFAULT_EVIDENCE_WEIGHT`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceWeights {
    weights: HashMap<EvidenceKey, f64>,
}

impl EvidenceWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<EvidenceKey>, weight: f64) -> Result<(), MassError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(MassError::InvalidWeight { weight });
        }
        self.weights.insert(key.into(), weight);
        Ok(())
    }

    /// The same weight for every item of `batch`, or `None` when `weight`
    /// does not exceed `ZERO_WEIGHT_DELTA` (weighting disabled).
    pub fn uniform(batch: &EvidenceBatch, weight: f64) -> Result<Option<Self>, MassError> {
        if !weight.is_finite() {
            return Err(MassError::InvalidWeight { weight });
        }
        if weight <= ZERO_WEIGHT_DELTA {
            return Ok(None);
        }
        let mut weights = Self::new();
        for key in batch.keys() {
            weights.set(key.clone(), weight)?;
        }
        Ok(Some(weights))
    }

    pub fn weight_for(&self, key: &EvidenceKey) -> f64 {
        self.weights
            .get(key)
            .copied()
            .unwrap_or(DEFAULT_EVIDENCE_WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Weight of `key` under optional weights.
pub fn weight_of(weights: Option<&EvidenceWeights>, key: &EvidenceKey) -> f64 {
    weights.map_or(DEFAULT_EVIDENCE_WEIGHT, |w| w.weight_for(key))
}
