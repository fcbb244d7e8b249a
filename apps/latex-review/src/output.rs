//! JSON report writer

use anyhow::{Context, Result};
use review_types::Report;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

const INDENT: &[u8] = b"   ";

/// Render the report with categories in their fixed order and a
/// three-space indent
pub fn render_report(report: &Report) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    report
        .serialize(&mut serializer)
        .context("Failed to serialize report")?;
    String::from_utf8(buf).context("Report is not valid UTF-8")
}

pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }
    let json = render_report(report)?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use review_types::{Category, IssueDetail, IssueRecord};

    #[test]
    fn test_empty_report_lists_every_category_in_order() {
        let json = render_report(&Report::new()).unwrap();
        let keys: Vec<&str> = json
            .lines()
            .filter_map(|line| line.strip_prefix("   \""))
            .filter_map(|rest| rest.split('"').next())
            .collect();

        let expected: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(keys, expected);
        assert!(json.starts_with("{\n   \"unresolved_references\": []"));
    }

    #[test]
    fn test_records_use_three_space_indent() {
        let mut report = Report::new();
        report.push(
            Category::RepeatedParentheses,
            IssueRecord::finding(
                "a.tex",
                3,
                IssueDetail::Matched {
                    matched_text: "((".to_string(),
                },
                None,
            ),
        );

        let json = render_report(&report).unwrap();
        assert!(json.contains("   \"repeated_parentheses\": [\n      {\n         \"file\": \"a.tex\",\n         \"line\": 3,"));
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/report.json");

        write_report(&Report::new(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_object().map(|o| o.len()), Some(Category::ALL.len()));
    }
}
