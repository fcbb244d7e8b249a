// Structural text checks: unresolved cross-references and doubled parentheses
use super::{LineContext, LineOutcome, LineRule};
use crate::patterns::{
    context_snippet, EMPTY_REFERENCE_PATTERN, REPEATED_PARENTHESES_PATTERN,
    UNRESOLVED_MARKER_PATTERN,
};
use crate::splitter::{is_comment_line, is_escaped, SplitLine};
use review_types::{Category, IssueDetail, IssueRecord, Report};

/// Flags `??` markers and reference commands with an empty argument
pub struct UnresolvedReferenceDetector;

impl LineRule for UnresolvedReferenceDetector {
    fn name(&self) -> &str {
        "unresolved_references"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if is_comment_line(line) {
            return LineOutcome::Unchanged;
        }

        if let Some(found) = find_unresolved_reference(SplitLine::new(line).code) {
            report.push(
                Category::UnresolvedReferences,
                IssueRecord::finding(
                    ctx.file,
                    ctx.line_number,
                    IssueDetail::Matched {
                        matched_text: found.to_string(),
                    },
                    context_snippet(line),
                ),
            );
        }

        LineOutcome::Unchanged
    }
}

/// First unresolved-reference marker in `code`, if any
pub fn find_unresolved_reference(code: &str) -> Option<&str> {
    EMPTY_REFERENCE_PATTERN
        .find(code)
        .or_else(|| UNRESOLVED_MARKER_PATTERN.find(code))
        .map(|m| m.as_str())
}

/// Flags `((` and `))` outside math delimiters
pub struct RepeatedParenthesesDetector;

impl LineRule for RepeatedParenthesesDetector {
    fn name(&self) -> &str {
        "repeated_parentheses"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if is_comment_line(line) {
            return LineOutcome::Unchanged;
        }

        if let Some(found) = find_repeated_parentheses(SplitLine::new(line).code) {
            report.push(
                Category::RepeatedParentheses,
                IssueRecord::finding(
                    ctx.file,
                    ctx.line_number,
                    IssueDetail::Matched {
                        matched_text: found.to_string(),
                    },
                    context_snippet(line),
                ),
            );
        }

        LineOutcome::Unchanged
    }
}

/// First doubled parenthesis whose first character is not a `\(` / `\)` delimiter
pub fn find_repeated_parentheses(code: &str) -> Option<&str> {
    REPEATED_PARENTHESES_PATTERN
        .find_iter(code)
        .find(|m| !is_escaped(code, m.start()))
        .map(|m| m.as_str())
}
