//! Core types for the benchmark report parser
//!
//! This module defines the fixed measurement schema (categories and the
//! 5-column measurement vector), the aggregated output types and the error
//! type shared by the whole library.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{AddAssign, Div};
use std::str::FromStr;

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Number of values recorded per category in one test
pub const MEASUREMENT_WIDTH: usize = 5;

/// Errors that can occur while parsing or aggregating a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Unknown category '{label}' in setup '{setup}', {test}")]
    UnknownCategory {
        setup: String,
        test: String,
        label: String,
    },

    #[error("Category '{category}' in setup '{setup}', {test} has {found} of 5 values")]
    TruncatedBlock {
        setup: String,
        test: String,
        category: Category,
        found: usize,
    },

    #[error("Invalid number '{value}' for category '{category}' in setup '{setup}', {test}")]
    InvalidNumber {
        setup: String,
        test: String,
        category: Category,
        value: String,
    },

    #[error("Setup '{setup}' has no measurements for category '{category}'")]
    MissingCategory { setup: String, category: Category },

    #[error("Duplicate setup: {0}")]
    DuplicateSetup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One of the four fixed measurement kinds
///
/// Variants are declared in canonical report order, which is also the
/// ordering used for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Write ST")]
    WriteSt,
    #[serde(rename = "Write MT")]
    WriteMt,
    #[serde(rename = "Read ST")]
    ReadSt,
    #[serde(rename = "Read MT")]
    ReadMt,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 4] = [
        Category::WriteSt,
        Category::WriteMt,
        Category::ReadSt,
        Category::ReadMt,
    ];

    /// The label as it appears in a report
    pub fn label(&self) -> &'static str {
        match self {
            Category::WriteSt => "Write ST",
            Category::WriteMt => "Write MT",
            Category::ReadSt => "Read ST",
            Category::ReadMt => "Read MT",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label is not one of the four categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let label = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .ok_or_else(|| UnknownCategory(label.to_string()))
    }
}

/// Five values for one category: either one test's raw values, a running
/// sum, or a mean
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement(pub [f64; MEASUREMENT_WIDTH]);

impl Measurement {
    pub fn new(values: [f64; MEASUREMENT_WIDTH]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; MEASUREMENT_WIDTH] {
        &self.0
    }

    /// Format as `[v1, v2, v3, v4, v5]` with a fixed number of decimals
    pub fn display_with_precision(&self, precision: usize) -> String {
        let cells: Vec<String> = self.0.iter().map(|v| format!("{:.*}", precision, v)).collect();
        format!("[{}]", cells.join(", "))
    }
}

impl AddAssign for Measurement {
    fn add_assign(&mut self, rhs: Self) {
        for (acc, v) in self.0.iter_mut().zip(rhs.0) {
            *acc += v;
        }
    }
}

impl Div<f64> for Measurement {
    type Output = Measurement;

    fn div(self, divisor: f64) -> Measurement {
        Measurement(self.0.map(|v| v / divisor))
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with_precision(3))
    }
}

/// Averaged results for a single setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupSummary {
    /// Setup label, trimmed
    pub name: String,
    /// Number of test sections that contributed to the averages
    pub tests: usize,
    /// Per-category element-wise means
    pub averages: BTreeMap<Category, Measurement>,
}

impl SetupSummary {
    /// Average for a category, if it appeared in any test
    pub fn average(&self, category: Category) -> Option<&Measurement> {
        self.averages.get(&category)
    }
}

/// Parsed and averaged report: setups in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkReport {
    pub setups: Vec<SetupSummary>,
}

impl BenchmarkReport {
    /// Look up a setup by name
    pub fn setup(&self, name: &str) -> Option<&SetupSummary> {
        self.setups.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.setups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setups.is_empty()
    }
}
