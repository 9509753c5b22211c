//! Report rendering
//!
//! Text output is one block per setup with categories in canonical order;
//! JSON output is the serialized `BenchmarkReport`.

use crate::config::OutputFormat;
use anyhow::Result;
use bench_report_parser::BenchmarkReport;
use std::fmt::Write;

/// Render a report in the requested format
pub fn render(report: &BenchmarkReport, format: OutputFormat, precision: usize) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(render_text(report, precision)),
        OutputFormat::Json => render_json(report),
    }
}

/// ```text
/// Setup: NFS
///   Write ST: [2.000, 3.000, 4.000, 5.000, 6.000]
/// ```
pub fn render_text(report: &BenchmarkReport, precision: usize) -> String {
    let mut out = String::new();

    for setup in &report.setups {
        let _ = writeln!(out, "Setup: {}", setup.name);
        for (category, average) in &setup.averages {
            let _ = writeln!(out, "  {}: {}", category, average.display_with_precision(precision));
        }
    }

    out
}

pub fn render_json(report: &BenchmarkReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_report_parser::ReportParser;

    const REPORT: &str = "\
*** NFS
### Test 1
Read ST
1
1
1
1
1
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
Read ST
2
2
2
2
2
*** EMPTY
";

    #[test]
    fn test_render_text() {
        let report = ReportParser::new().parse_str(REPORT).unwrap();
        let text = render_text(&report, 3);

        assert_eq!(
            text,
            "Setup: NFS\n  \
             Write ST: [2.000, 3.000, 4.000, 5.000, 6.000]\n  \
             Read ST: [1.500, 1.500, 1.500, 1.500, 1.500]\n\
             Setup: EMPTY\n"
        );
    }

    #[test]
    fn test_render_text_precision() {
        let report = ReportParser::new().parse_str(REPORT).unwrap();
        let text = render(&report, OutputFormat::Txt, 1).unwrap();
        assert!(text.contains("  Read ST: [1.5, 1.5, 1.5, 1.5, 1.5]\n"));
    }

    #[test]
    fn test_render_json() {
        let report = ReportParser::new().parse_str(REPORT).unwrap();
        let json = render(&report, OutputFormat::Json, 3).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["name"], "NFS");
        assert_eq!(value[0]["tests"], 2);
        assert_eq!(value[0]["averages"]["Read ST"][0], 1.5);
        assert_eq!(value[1]["name"], "EMPTY");
        assert_eq!(value[1]["averages"], serde_json::json!({}));
    }
}
