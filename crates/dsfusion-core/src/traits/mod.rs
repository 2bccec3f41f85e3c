pub mod combination_rule;

pub use combination_rule::ICombinationRule;
