//! Report parser
//!
//! Splits a report into setups (`*** <name>`), each setup into test sections
//! (`### Test <N>`), and each test into 6-line category blocks: a category
//! label followed by five numeric values.

use crate::aggregate::{ReportBuilder, SetupAccumulator};
use crate::config::ParserConfig;
use crate::types::{BenchmarkReport, Category, Measurement, ReportError, Result, MEASUREMENT_WIDTH};
use regex::Regex;
use std::path::Path;

/// Lines per category block: the label plus its values
const BLOCK_LINES: usize = MEASUREMENT_WIDTH + 1;

const SETUP_MARKER: &str = r"(?m)^\*\*\* ";
const TEST_MARKER: &str = r"(?m)^[ \t]*###[ \t]*(Test[ \t]+\d+)";

/// One `### Test N` section of a setup body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSection<'a> {
    /// The captured marker label, e.g. `Test 3`
    pub label: &'a str,
    /// Everything between this marker and the next one
    pub content: &'a str,
}

/// The main parser struct - entry point for turning report text into averages
pub struct ReportParser {
    config: ParserConfig,
    setup_marker: Regex,
    test_marker: Regex,
}

impl ReportParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with an explicit configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            setup_marker: Regex::new(SETUP_MARKER).expect("setup marker pattern is valid"),
            test_marker: Regex::new(TEST_MARKER).expect("test marker pattern is valid"),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Read a report file fully and parse it
    ///
    /// # Example
    /// ```no_run
    /// use bench_report_parser::ReportParser;
    /// use std::path::Path;
    ///
    /// let parser = ReportParser::new();
    /// let report = parser.parse_file(Path::new("test_results.txt")).unwrap();
    /// for setup in &report.setups {
    ///     println!("{}: {} tests", setup.name, setup.tests);
    /// }
    /// ```
    pub fn parse_file(&self, path: &Path) -> Result<BenchmarkReport> {
        log::info!("Reading report: {:?}", path);

        let text = std::fs::read_to_string(path)?;
        let report = self.parse_str(&text)?;

        log::info!("Parsed {} setup(s) from {:?}", report.len(), path);
        Ok(report)
    }

    /// Parse report text that is already in memory
    pub fn parse_str(&self, text: &str) -> Result<BenchmarkReport> {
        let mut builder = ReportBuilder::new(self.config.clone());

        for (name, body) in self.split_setups(text) {
            let setup = self.parse_setup(name, body)?;
            builder.push(setup)?;
        }

        builder.finish()
    }

    /// Split report text into `(setup name, body)` pairs
    ///
    /// Whitespace-only chunks, such as an empty preamble before the first
    /// marker, are dropped.
    pub fn split_setups<'a>(&self, text: &'a str) -> Vec<(&'a str, &'a str)> {
        self.setup_marker
            .split(text)
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| match chunk.split_once('\n') {
                Some((name, body)) => (name.trim(), body),
                None => (chunk, ""),
            })
            .collect()
    }

    /// Split a setup body into its test sections
    ///
    /// Text before the first marker belongs to no test and is not returned.
    pub fn split_tests<'a>(&self, body: &'a str) -> Vec<TestSection<'a>> {
        let markers: Vec<_> = self.test_marker.captures_iter(body).collect();
        let mut sections = Vec::with_capacity(markers.len());

        for (test_index, caps) in markers.iter().enumerate() {
            let (Some(marker), Some(label)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let end = markers
                .get(test_index + 1)
                .and_then(|next| next.get(0))
                .map(|next| next.start())
                .unwrap_or(body.len());

            sections.push(TestSection {
                label: label.as_str(),
                content: &body[marker.end()..end],
            });
        }

        sections
    }

    fn parse_setup(&self, name: &str, body: &str) -> Result<SetupAccumulator> {
        let mut setup = SetupAccumulator::new(name);
        let sections = self.split_tests(body);

        if sections.is_empty() {
            log::debug!("Setup '{}' has no test sections", name);
            return Ok(setup);
        }

        if let Some(first) = self.test_marker.find(body) {
            if !body[..first.start()].trim().is_empty() {
                log::warn!("Ignoring text before the first test of setup '{}'", name);
            }
        }

        for section in sections {
            log::debug!("Parsing setup '{}', {}", name, section.label);
            setup.begin_test();
            parse_test(&mut setup, &section)?;
        }

        log::debug!("Setup '{}': {} test(s)", name, setup.tests());
        Ok(setup)
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the category blocks of one test into the setup's running sums
fn parse_test(setup: &mut SetupAccumulator, section: &TestSection<'_>) -> Result<()> {
    let lines: Vec<&str> = section
        .content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    for block in lines.chunks(BLOCK_LINES) {
        let category: Category = block[0].parse().map_err(|_| ReportError::UnknownCategory {
            setup: setup.name().to_string(),
            test: section.label.to_string(),
            label: block[0].to_string(),
        })?;

        let raw_values = &block[1..];
        if raw_values.len() < MEASUREMENT_WIDTH {
            return Err(ReportError::TruncatedBlock {
                setup: setup.name().to_string(),
                test: section.label.to_string(),
                category,
                found: raw_values.len(),
            });
        }

        let mut values = [0.0; MEASUREMENT_WIDTH];
        for (stride, raw) in raw_values.iter().enumerate() {
            values[stride] = raw.parse().map_err(|_| ReportError::InvalidNumber {
                setup: setup.name().to_string(),
                test: section.label.to_string(),
                category,
                value: raw.to_string(),
            })?;
        }

        log::trace!("{} / {} / {}: {:?}", setup.name(), section.label, category, values);
        setup.add(category, Measurement::new(values));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TESTS: &str = "\
*** NFS
### Test 1
Write ST
1.0
2.0
3.0
4.0
5.0
### Test 2
Write ST
3.0
4.0
5.0
6.0
7.0
";

    #[test]
    fn test_split_setups() {
        let parser = ReportParser::new();
        let text = "\n\n*** NFS\nbody one\n*** 1 SERVER  \r\nbody two\n*** EMPTY";
        let setups = parser.split_setups(text);

        assert_eq!(setups.len(), 3);
        assert_eq!(setups[0], ("NFS", "body one"));
        assert_eq!(setups[1].0, "1 SERVER");
        assert_eq!(setups[1].1, "body two");
        assert_eq!(setups[2], ("EMPTY", ""));
    }

    #[test]
    fn test_setup_marker_only_at_line_start() {
        let parser = ReportParser::new();
        let setups = parser.split_setups("*** NFS\nnote: *** not a setup\n");
        assert_eq!(setups.len(), 1);
        assert_eq!(setups[0].0, "NFS");
    }

    #[test]
    fn test_split_tests() {
        let parser = ReportParser::new();
        let body = "preamble\n### Test 1\nA\n### Test 12\nB\nC\n";
        let tests = parser.split_tests(body);

        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].label, "Test 1");
        assert_eq!(tests[0].content.trim(), "A");
        assert_eq!(tests[1].label, "Test 12");
        assert_eq!(tests[1].content.trim(), "B\nC");
    }

    #[test]
    fn test_split_tests_without_markers() {
        let parser = ReportParser::new();
        assert!(parser.split_tests("Write ST\n1\n2\n3\n4\n5\n").is_empty());
        assert!(parser.split_tests("").is_empty());
    }

    #[test]
    fn test_two_tests_averaged() {
        let report = ReportParser::new().parse_str(TWO_TESTS).unwrap();
        let nfs = report.setup("NFS").unwrap();

        assert_eq!(nfs.tests, 2);
        assert_eq!(
            nfs.average(Category::WriteSt).unwrap().to_string(),
            "[2.000, 3.000, 4.000, 5.000, 6.000]"
        );
    }

    #[test]
    fn test_blank_lines_inside_test_are_ignored() {
        let text = "*** NFS\n### Test 1\n\nRead MT\n1\n\n2\n3\n4\n5\n\n";
        let report = ReportParser::new().parse_str(text).unwrap();
        let nfs = report.setup("NFS").unwrap();
        assert_eq!(
            nfs.average(Category::ReadMt),
            Some(&Measurement::new([1.0, 2.0, 3.0, 4.0, 5.0]))
        );
    }

    #[test]
    fn test_unknown_category() {
        let text = "*** NFS\n### Test 1\nCopy ST\n1\n2\n3\n4\n5\n";
        let err = ReportParser::new().parse_str(text).unwrap_err();
        match err {
            ReportError::UnknownCategory { setup, test, label } => {
                assert_eq!(setup, "NFS");
                assert_eq!(test, "Test 1");
                assert_eq!(label, "Copy ST");
            }
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_block() {
        let text = "*** NFS\n### Test 1\nWrite MT\n1\n2\n3\n";
        let err = ReportParser::new().parse_str(text).unwrap_err();
        assert!(matches!(
            err,
            ReportError::TruncatedBlock { category: Category::WriteMt, found: 3, .. }
        ));
    }

    #[test]
    fn test_invalid_number() {
        let text = "*** NFS\n### Test 1\nRead ST\n1\n2\nfast\n4\n5\n";
        let err = ReportParser::new().parse_str(text).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidNumber { ref value, category: Category::ReadSt, .. } if value == "fast"
        ));
    }
}
