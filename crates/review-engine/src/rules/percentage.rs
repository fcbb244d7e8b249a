// Percent sign escaping and spacing
use super::{LineContext, LineOutcome, LineRule};
use crate::patterns::ESCAPED_PERCENT_AFTER_DIGIT;
use crate::regions::Region;
use crate::splitter::{
    is_comment_line, is_escaped, strip_line_ending, SplitLine, COMMENT_MARKER, ESCAPE_CHAR,
};
use review_types::{Category, IssueDetail, IssueRecord, Report};

/// Normalizes percentages to `<number> \%`.
///
/// A `%` written directly after a digit is read as a percent sign, not as a
/// comment marker. Any other `%` keeps its comment meaning and the comment
/// text is left untouched.
pub struct PercentageFixer;

impl LineRule for PercentageFixer {
    fn name(&self) -> &str {
        "percentage_misuse"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if ctx.region == Region::Verbatim || is_comment_line(line) {
            return LineOutcome::Unchanged;
        }

        let fixed = normalize_percentages(line);
        if fixed == line {
            return LineOutcome::Unchanged;
        }

        report.push(
            Category::PercentageMisuse,
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

/// `10%` -> `10 \%`, `10\%` -> `10 \%`; `10 \%` is already normalized
pub fn normalize_percentages(line: &str) -> String {
    let escaped = escape_percent_after_digit(line);
    let split = SplitLine::new(&escaped);
    let code = ESCAPED_PERCENT_AFTER_DIGIT.replace_all(split.code, "${1} \\%");
    split.join(&code)
}

/// Escape every comment marker that directly follows a digit
fn escape_percent_after_digit(line: &str) -> String {
    let split = SplitLine::reading_percent_signs(line);
    let mut out = String::with_capacity(line.len() + 4);

    for (idx, ch) in split.code.char_indices() {
        if ch == COMMENT_MARKER && !is_escaped(split.code, idx) {
            out.push(ESCAPE_CHAR);
        }
        out.push(ch);
    }
    out.push_str(split.comment);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{ctx, ctx_in};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalizes_all_forms() {
        assert_eq!(normalize_percentages("10% of runs"), "10 \\% of runs");
        assert_eq!(normalize_percentages("10\\% of runs"), "10 \\% of runs");
        assert_eq!(normalize_percentages("10 \\% of runs"), "10 \\% of runs");
    }

    #[test]
    fn test_handles_several_percentages() {
        assert_eq!(
            normalize_percentages("from 5% to 7%\n"),
            "from 5 \\% to 7 \\%\n"
        );
    }

    #[test]
    fn test_real_comment_is_untouched() {
        assert_eq!(
            normalize_percentages("up 5\\% % was 4% before\n"),
            "up 5 \\% % was 4% before\n"
        );
    }

    #[test]
    fn test_records_before_and_after() {
        let mut report = Report::new();
        let outcome = PercentageFixer.apply("gain of 12%\n", &ctx(9), &mut report);

        assert_eq!(
            outcome,
            LineOutcome::Rewritten("gain of 12 \\%\n".to_string())
        );
        let record = &report.records(Category::PercentageMisuse)[0];
        assert_eq!(
            record.detail,
            IssueDetail::Rewrite {
                before: "gain of 12%".to_string(),
                after: "gain of 12 \\%".to_string(),
            }
        );
    }

    #[test]
    fn test_skips_comment_lines_and_verbatim() {
        let mut report = Report::new();
        assert_eq!(
            PercentageFixer.apply("  % 10% done", &ctx(1), &mut report),
            LineOutcome::Unchanged
        );
        assert_eq!(
            PercentageFixer.apply("10%", &ctx_in(Region::Verbatim), &mut report),
            LineOutcome::Unchanged
        );
        assert!(report.is_empty());
    }
}
