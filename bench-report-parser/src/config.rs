//! Parser configuration types
//!
//! The report layout itself is fixed; configuration only covers the
//! decisions the layout leaves open.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configuration for the report parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// What to do when a setup label occurs more than once
    #[serde(default)]
    pub duplicate_setups: DuplicatePolicy,

    /// Fail if a setup with tests lacks any of the four categories
    #[serde(default)]
    pub require_all_categories: bool,
}

/// Handling of a setup label that appears more than once in a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Abort with `ReportError::DuplicateSetup`
    #[default]
    Reject,
    /// Pool the tests of every occurrence into one average
    Merge,
    /// Keep only the last occurrence
    Overwrite,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::Merge => write!(f, "merge"),
            DuplicatePolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "merge" => Ok(DuplicatePolicy::Merge),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(format!("unknown duplicate setup policy: {}", other)),
        }
    }
}

impl ParserConfig {
    /// Create a new parser configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the duplicate setup policy
    pub fn with_duplicate_setups(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_setups = policy;
        self
    }

    /// Builder method: require every category in every setup that has tests
    pub fn with_all_categories_required(mut self, required: bool) -> Self {
        self.require_all_categories = required;
        self
    }
}
