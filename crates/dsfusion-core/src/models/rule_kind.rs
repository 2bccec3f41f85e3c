use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FusionError;

/// The closed set of combination rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    DempsterShafer,
    Murphy,
    Yager,
    Zhang,
    /// No combination: the newest evidence replaces the state.
    Overwrite,
}

impl RuleKind {
    pub const ALL: [RuleKind; 5] = [
        RuleKind::DempsterShafer,
        RuleKind::Murphy,
        RuleKind::Yager,
        RuleKind::Zhang,
        RuleKind::Overwrite,
    ];

    /// The selector string for this rule.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DempsterShafer => "DEMPSTER_SHAFER",
            Self::Murphy => "MURPHY",
            Self::Yager => "YAGER",
            Self::Zhang => "ZHANG",
            Self::Overwrite => "OVERWRITE",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim();
        if selector.is_empty() {
            return Err(FusionError::InvalidArgument(
                "no combination rule selected".to_string(),
            ));
        }
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(selector))
            .ok_or_else(|| {
                FusionError::InvalidArgument(format!("unknown combination rule: {selector}"))
            })
    }
}
