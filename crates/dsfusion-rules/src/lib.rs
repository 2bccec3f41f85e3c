//! # dsfusion-rules
//!
//! Evidence combination rules over Dempster-Shafer mass functions.
//!
//! - [`dempster`]: conjunctive combination, conflict normalized away.
//! - [`yager`]: conjunctive combination, conflict moved to the universal set.
//! - [`murphy`]: weighted averaging, then repeated Dempster self-combination.
//! - [`zhang`]: credibility-weighted averaging over the power set.
//! - [`overwrite`]: newest evidence wins.
//!
//! Every rule implements [`ICombinationRule`](dsfusion_core::ICombinationRule).
//! [`FusionEngine`] selects one by [`RuleKind`](dsfusion_core::RuleKind) and
//! works on the rule-tagged [`AccumulatorState`](dsfusion_core::AccumulatorState).

pub mod dempster;
pub mod engine;
pub mod murphy;
pub mod overwrite;
mod sequential;
pub mod yager;
pub mod zhang;

pub use dempster::DempsterRule;
pub use engine::FusionEngine;
pub use murphy::MurphyRule;
pub use overwrite::OverwriteRule;
pub use yager::YagerRule;
pub use zhang::ZhangRule;
