// Repeated space collapsing
use super::{LineContext, LineOutcome, LineRule};
use crate::patterns::{MULTI_SPACE_PATTERN, SPACES_AFTER_TEXT_PATTERN, TABLE_BOUNDARY_PATTERN};
use crate::regions::Region;
use crate::splitter::{strip_line_ending, SplitLine};
use review_types::{Category, IssueDetail, IssueRecord, Report};

/// Collapses runs of spaces in running text to a single space, keeping the
/// leading indentation and any trailing comment as they are
pub struct DoubleWhitespaceFixer;

impl LineRule for DoubleWhitespaceFixer {
    fn name(&self) -> &str {
        "double_whitespace"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if ctx.region == Region::Verbatim {
            return LineOutcome::Unchanged;
        }

        let Some(fixed) = collapse_spaces(line) else {
            return LineOutcome::Unchanged;
        };

        report.push(
            Category::DoubleWhitespace,
            IssueRecord::applied(
                ctx.file,
                Some(ctx.line_number),
                IssueDetail::Rewrite {
                    before: strip_line_ending(line).to_string(),
                    after: strip_line_ending(&fixed).to_string(),
                },
                None,
            ),
        );

        LineOutcome::Rewritten(fixed)
    }
}

/// The line with repeated spaces collapsed, or `None` when nothing changes.
/// Lines opening or closing a table-like environment are left alone.
pub fn collapse_spaces(line: &str) -> Option<String> {
    if TABLE_BOUNDARY_PATTERN.is_match(line) {
        return None;
    }

    let split = SplitLine::new(line);
    let content = split.code.trim_start_matches([' ', '\t']);
    let indent = &split.code[..split.code.len() - content.len()];

    if !SPACES_AFTER_TEXT_PATTERN.is_match(content) {
        return None;
    }

    let fixed = MULTI_SPACE_PATTERN.replace_all(content, " ");
    if fixed == content {
        return None;
    }

    Some(split.join(&format!("{}{}", indent, fixed)))
}
