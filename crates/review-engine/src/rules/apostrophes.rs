// Apostrophe usage detection
use super::{LineContext, LineOutcome, LineRule};
use review_types::{Category, IssueDetail, IssueRecord, Report};

/// Flags lines with a straight apostrophe that are not using the ``quote''
/// digraphs, where the apostrophe is most likely a contraction or a
/// possessive that should be reviewed by hand
pub struct ApostropheDetector;

impl LineRule for ApostropheDetector {
    fn name(&self) -> &str {
        "apostrophes"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if has_stray_apostrophe(line) {
            report.push(
                Category::Apostrophes,
                IssueRecord::finding(
                    ctx.file,
                    ctx.line_number,
                    IssueDetail::Matched {
                        matched_text: line.trim().to_string(),
                    },
                    None,
                ),
            );
        }

        LineOutcome::Unchanged
    }
}

pub fn has_stray_apostrophe(line: &str) -> bool {
    line.contains('\'') && !(line.contains("``") || line.contains("''"))
}
