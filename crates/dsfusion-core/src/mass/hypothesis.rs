use std::fmt;

use serde::{Deserialize, Serialize};

/// An atomic element of the frame of discernment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hypothesis(pub String);

impl Hypothesis {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Hypothesis {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Hypothesis {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Hypothesis> for Hypothesis {
    fn from(h: &Hypothesis) -> Self {
        h.clone()
    }
}
