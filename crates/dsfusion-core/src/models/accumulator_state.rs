use serde::{Deserialize, Serialize};

use super::{ConjunctiveState, MurphyState, RuleKind, ZhangState};
use crate::mass::MassFunction;

/// Rule-tagged accumulator state passed between calls.
///
/// Each combination call consumes the state it is given and returns a new
/// one; the returned value is the only current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccumulatorState {
    DempsterShafer(ConjunctiveState),
    Murphy(MurphyState),
    Yager(ConjunctiveState),
    Zhang(ZhangState),
    Overwrite(MassFunction),
}

impl AccumulatorState {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::DempsterShafer(_) => RuleKind::DempsterShafer,
            Self::Murphy(_) => RuleKind::Murphy,
            Self::Yager(_) => RuleKind::Yager,
            Self::Zhang(_) => RuleKind::Zhang,
            Self::Overwrite(_) => RuleKind::Overwrite,
        }
    }

    /// Evidence folded so far. The overwrite rule only ever holds one.
    pub fn number_of_evidences(&self) -> usize {
        match self {
            Self::DempsterShafer(s) | Self::Yager(s) => s.number_of_evidences,
            Self::Murphy(s) => s.number_of_evidences,
            Self::Zhang(s) => s.number_of_evidences(),
            Self::Overwrite(m) => usize::from(!m.is_empty()),
        }
    }

    /// The last finalized mass function.
    pub fn combined(&self) -> &MassFunction {
        match self {
            Self::DempsterShafer(s) | Self::Yager(s) => &s.combined,
            Self::Murphy(s) => &s.combined,
            Self::Zhang(s) => &s.combined,
            Self::Overwrite(m) => m,
        }
    }

    /// The most recent raw update.
    pub fn last_evidence(&self) -> &MassFunction {
        match self {
            Self::DempsterShafer(s) | Self::Yager(s) => &s.last_evidence,
            Self::Murphy(s) => &s.last_evidence,
            Self::Zhang(s) => &s.last_evidence,
            Self::Overwrite(m) => m,
        }
    }
}
