//! Mass-function model: hypotheses, canonical focal sets, and basic belief
//! assignments over them.

pub mod focal_set;
pub mod hypothesis;
pub mod mass_function;

pub use focal_set::FocalSet;
pub use hypothesis::Hypothesis;
pub use mass_function::{MassEntry, MassFunction};
