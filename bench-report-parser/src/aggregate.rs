//! Per-setup accumulation and averaging
//!
//! The parser feeds one test at a time into a `SetupAccumulator`; the
//! `ReportBuilder` collects finished setups in order of first appearance and
//! applies the duplicate setup policy.

use crate::config::{DuplicatePolicy, ParserConfig};
use crate::types::{BenchmarkReport, Category, Measurement, ReportError, Result, SetupSummary};
use std::collections::BTreeMap;

/// Running sums for one setup plus the number of tests that produced them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupAccumulator {
    name: String,
    sums: BTreeMap<Category, Measurement>,
    tests: usize,
}

impl SetupAccumulator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sums: BTreeMap::new(),
            tests: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of test sections recorded so far
    pub fn tests(&self) -> usize {
        self.tests
    }

    /// Mark the start of a new test section
    pub fn begin_test(&mut self) {
        self.tests += 1;
    }

    /// Add one category block to the running sum
    pub fn add(&mut self, category: Category, values: Measurement) {
        *self.sums.entry(category).or_default() += values;
    }

    /// Fold another occurrence of the same setup into this one
    pub fn merge(&mut self, other: SetupAccumulator) {
        for (category, values) in other.sums {
            self.add(category, values);
        }
        self.tests += other.tests;
    }

    /// Divide every running sum by the test count
    ///
    /// A setup without tests yields an empty average map.
    pub fn finish(self, require_all_categories: bool) -> Result<SetupSummary> {
        if self.tests == 0 {
            return Ok(SetupSummary {
                name: self.name,
                tests: 0,
                averages: BTreeMap::new(),
            });
        }

        if require_all_categories {
            if let Some(missing) = Category::ALL.into_iter().find(|c| !self.sums.contains_key(c)) {
                return Err(ReportError::MissingCategory {
                    setup: self.name,
                    category: missing,
                });
            }
        }

        let divisor = self.tests as f64;
        let averages = self
            .sums
            .into_iter()
            .map(|(category, sum)| (category, sum / divisor))
            .collect();

        Ok(SetupSummary {
            name: self.name,
            tests: self.tests,
            averages,
        })
    }
}

/// Collects setups as they are parsed
#[derive(Debug, Default)]
pub struct ReportBuilder {
    config: ParserConfig,
    setups: Vec<SetupAccumulator>,
}

impl ReportBuilder {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            setups: Vec::new(),
        }
    }

    /// Record a fully parsed setup
    pub fn push(&mut self, setup: SetupAccumulator) -> Result<()> {
        let existing = self.setups.iter().position(|s| s.name == setup.name);

        match (existing, self.config.duplicate_setups) {
            (None, _) => self.setups.push(setup),
            (Some(_), DuplicatePolicy::Reject) => {
                return Err(ReportError::DuplicateSetup(setup.name));
            }
            (Some(index), DuplicatePolicy::Merge) => {
                log::warn!(
                    "Setup '{}' appears again, merging {} more test(s)",
                    setup.name,
                    setup.tests
                );
                self.setups[index].merge(setup);
            }
            (Some(index), DuplicatePolicy::Overwrite) => {
                log::warn!(
                    "Setup '{}' appears again, discarding {} earlier test(s)",
                    setup.name,
                    self.setups[index].tests
                );
                self.setups[index] = setup;
            }
        }

        Ok(())
    }

    /// Average every setup and produce the final report
    pub fn finish(self) -> Result<BenchmarkReport> {
        let require_all = self.config.require_all_categories;
        let setups = self
            .setups
            .into_iter()
            .map(|s| s.finish(require_all))
            .collect::<Result<Vec<_>>>()?;

        Ok(BenchmarkReport { setups })
    }
}
