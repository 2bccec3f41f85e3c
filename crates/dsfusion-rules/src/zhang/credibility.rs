//! Support, credibility, and the credibility-weighted reformed mass.

use dsfusion_core::errors::FusionResult;
use dsfusion_core::models::WeightedEvidence;
use dsfusion_core::{FocalSet, MassFunction};

/// Degree of support of each record (row sums of the similarity matrix),
/// normalized to sum to one.
///
/// Every row includes its own 1.0 on the diagonal, so the total is at least
/// the number of records and the division is always defined.
pub fn credibility(similarity: &[Vec<f64>]) -> Vec<f64> {
    let support: Vec<f64> = similarity.iter().map(|row| row.iter().sum::<f64>()).collect();
    let total: f64 = support.iter().sum();
    if total <= 0.0 {
        return vec![0.0; support.len()];
    }
    support.into_iter().map(|s| s / total).collect()
}

/// Credibility- and weight-discounted average of every record over
/// `powerset`, normalized to one.
pub fn reformed_mass(
    records: &[WeightedEvidence],
    credibility: &[f64],
    powerset: &[FocalSet],
) -> FusionResult<MassFunction> {
    let mut reformed = MassFunction::new();
    for focal in powerset {
        let mass: f64 = records
            .iter()
            .zip(credibility)
            .map(|(record, crd)| crd * record.mass.get(focal) * record.weight)
            .sum();
        reformed.insert(focal.clone(), mass)?;
    }
    Ok(reformed.normalized()?)
}
