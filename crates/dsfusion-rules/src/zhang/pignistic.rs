//! Pignistic transform and the similarity between transformed records.

use dsfusion_core::constants::{CONFLICT_EPSILON, OPEN_WORLD_HYPOTHESIS};
use dsfusion_core::{FocalSet, Hypothesis, MassFunction};

/// Point probability of each hypothesis of `frame` under `mass`.
///
/// Each focal set shares its mass equally among its members. Belief held by
/// the open-world singleton is factored out by dividing by `1 − m({zero})`;
/// when that leaves nothing, the vector is all zeros.
pub fn pignistic_vector(mass: &MassFunction, frame: &[Hypothesis]) -> Vec<f64> {
    let open_world = mass.get(&FocalSet::singleton(OPEN_WORLD_HYPOTHESIS));
    let denominator = 1.0 - open_world;
    if denominator <= CONFLICT_EPSILON {
        return vec![0.0; frame.len()];
    }

    frame
        .iter()
        .map(|theta| {
            mass.iter()
                .filter(|(focal, m)| **m > 0.0 && focal.contains(theta))
                .map(|(focal, m)| m / focal.len() as f64 / denominator)
                .sum::<f64>()
        })
        .collect()
}

/// Cosine similarity between two vectors.
/// Returns 0.0 for zero-length or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Pairwise similarity of every record to every other. The diagonal is
/// exactly 1.0.
pub fn similarity_matrix(vectors: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let sim = cosine_similarity(&vectors[i], &vectors[j]);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }
    matrix
}
