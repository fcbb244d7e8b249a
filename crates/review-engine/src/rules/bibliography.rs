// Citations whose keys are missing from the bibliography
use super::{LineContext, LineOutcome, LineRule};
use crate::bibtex::BibKeySet;
use crate::patterns::{context_snippet, CITE_PATTERN};
use crate::splitter::{is_comment_line, SplitLine};
use review_types::{Category, IssueDetail, IssueRecord, Report};
use std::sync::Arc;

/// Flags every cited key that the bibliography does not define
pub struct MissingBibEntryDetector {
    keys: Arc<BibKeySet>,
}

impl MissingBibEntryDetector {
    pub fn new(keys: Arc<BibKeySet>) -> Self {
        Self { keys }
    }
}

impl LineRule for MissingBibEntryDetector {
    fn name(&self) -> &str {
        "missing_bib_entries"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if is_comment_line(line) {
            return LineOutcome::Unchanged;
        }

        for (citation, key) in missing_keys(SplitLine::new(line).code, &self.keys) {
            report.push(
                Category::MissingBibEntries,
                IssueRecord::finding(
                    ctx.file,
                    ctx.line_number,
                    IssueDetail::MissingBibEntry {
                        key: key.to_string(),
                        citation: citation.to_string(),
                    },
                    context_snippet(line),
                ),
            );
        }

        LineOutcome::Unchanged
    }
}

/// `(citation, key)` for every cited key absent from `keys`
pub fn missing_keys<'a>(code: &'a str, keys: &BibKeySet) -> Vec<(&'a str, &'a str)> {
    let mut missing = Vec::new();
    for caps in CITE_PATTERN.captures_iter(code) {
        let (Some(citation), Some(list)) = (caps.get(0), caps.name("keys")) else {
            continue;
        };
        for key in list.as_str().split(',').map(str::trim) {
            if !key.is_empty() && !keys.contains(key) {
                missing.push((citation.as_str(), key));
            }
        }
    }
    missing
}
