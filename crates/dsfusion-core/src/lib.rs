//! # dsfusion-core
//!
//! Foundation crate for the dsfusion evidence-combination engine.
//! Defines the mass-function model, evidence batches, accumulator states,
//! the rule trait, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod evidence;
pub mod mass;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FusionConfig;
pub use errors::{FusionError, FusionResult};
pub use evidence::{EvidenceBatch, EvidenceKey, EvidenceWeights};
pub use mass::{FocalSet, Hypothesis, MassFunction};
pub use models::{AccumulatorState, RuleKind};
pub use traits::ICombinationRule;
