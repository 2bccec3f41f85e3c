//! Accumulator state models, one per combination rule, and the closed
//! rule/state enums the dispatcher works with.

pub mod accumulator_state;
pub mod conjunctive_state;
pub mod murphy_state;
pub mod rule_kind;
pub mod zhang_state;

pub use accumulator_state::AccumulatorState;
pub use conjunctive_state::ConjunctiveState;
pub use murphy_state::MurphyState;
pub use rule_kind::RuleKind;
pub use zhang_state::{WeightedEvidence, ZhangState};
