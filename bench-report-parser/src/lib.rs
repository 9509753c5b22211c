//! Benchmark Report Parser Library
//!
//! Parses plain-text benchmark reports grouped into setups and numbered test
//! runs, and averages the repeated measurements of each setup.
//!
//! # Report layout
//!
//! ```text
//! *** NFS
//! ### Test 1
//! Write ST
//! 1.0
//! 2.0
//! 3.0
//! 4.0
//! 5.0
//! ### Test 2
//! ...
//! *** 1 SERVER
//! ...
//! ```
//!
//! Every category block is a label (`Write ST`, `Write MT`, `Read ST` or
//! `Read MT`) followed by exactly five numbers. Unknown labels, short blocks
//! and non-numeric values abort the whole parse.
//!
//! # Example Usage
//!
//! ```
//! use bench_report_parser::{Category, ReportParser};
//!
//! let text = "*** NFS\n### Test 1\nWrite ST\n1\n2\n3\n4\n5\n### Test 2\nWrite ST\n3\n4\n5\n6\n7\n";
//! let report = ReportParser::new().parse_str(text).unwrap();
//!
//! let nfs = report.setup("NFS").unwrap();
//! assert_eq!(nfs.tests, 2);
//! assert_eq!(
//!     nfs.average(Category::WriteSt).unwrap().to_string(),
//!     "[2.000, 3.000, 4.000, 5.000, 6.000]"
//! );
//! ```

// Public modules
pub mod aggregate;
pub mod config;
pub mod parser;
pub mod types;

// Re-export main types for convenience
pub use aggregate::{ReportBuilder, SetupAccumulator};
pub use config::{DuplicatePolicy, ParserConfig};
pub use parser::{ReportParser, TestSection};
pub use types::{
    BenchmarkReport, Category, Measurement, ReportError, Result, SetupSummary,
    UnknownCategory, MEASUREMENT_WIDTH,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty report parses to no setups
        let report = ReportParser::new().parse_str("").unwrap();
        assert!(report.is_empty());
    }
}
