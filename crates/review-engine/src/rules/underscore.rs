// Underscore escaping
use super::{LineContext, LineOutcome, LineRule};
use crate::patterns::{in_spans, protected_spans};
use crate::regions::Region;
use crate::splitter::{is_escaped, strip_line_ending, SplitLine};
use review_types::{Category, IssueDetail, IssueRecord, Report};
use serde::{Deserialize, Serialize};

/// Which part of a line the underscore fixer may rewrite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderscoreScope {
    /// Only the code segment; comments are left as written
    #[default]
    Code,
    /// The whole line, comment included
    Line,
}

/// Escapes bare `_` in running text as `\_`
pub struct UnderscoreFixer {
    scope: UnderscoreScope,
}

impl UnderscoreFixer {
    pub fn new(scope: UnderscoreScope) -> Self {
        Self { scope }
    }
}

impl LineRule for UnderscoreFixer {
    fn name(&self) -> &str {
        "underscore_misuse"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if ctx.region != Region::Text || !line.contains('_') {
            return LineOutcome::Unchanged;
        }

        let fixed = match self.scope {
            UnderscoreScope::Code => {
                let split = SplitLine::new(line);
                escape_underscores(split.code).map(|code| split.join(&code))
            }
            UnderscoreScope::Line => escape_underscores(line),
        };

        let Some(fixed) = fixed else {
            return LineOutcome::Unchanged;
        };

        report.push(
            Category::UnderscoreMisuse,
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

/// `text` with every unescaped underscore outside math and reference
/// arguments escaped, or `None` when there is nothing to escape
pub fn escape_underscores(text: &str) -> Option<String> {
    let protected = protected_spans(text);
    let mut out = String::with_capacity(text.len() + 8);
    let mut changed = false;

    for (idx, ch) in text.char_indices() {
        if ch == '_' && !is_escaped(text, idx) && !in_spans(&protected, idx) {
            out.push('\\');
            changed = true;
        }
        out.push(ch);
    }

    changed.then_some(out)
}
