// Glossary plural command correction
use super::{LineContext, LineOutcome, LineRule};
use crate::patterns::GLOSSARY_PLURAL_PATTERN;
use crate::regions::Region;
use crate::splitter::{strip_line_ending, SplitLine};
use review_types::{Category, IssueDetail, IssueRecord, Report};

/// Rewrites `\gls{key}s` as `\glspl{key}` (and `\Gls{key}s` as `\Glspl{key}`)
pub struct GlossaryPluralFixer;

impl LineRule for GlossaryPluralFixer {
    fn name(&self) -> &str {
        "glossary_plural"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if ctx.region == Region::Verbatim {
            return LineOutcome::Unchanged;
        }

        let Some(fixed) = fix_glossary_plurals(line) else {
            return LineOutcome::Unchanged;
        };

        report.push(
            Category::GlossaryPlural,
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

pub fn fix_glossary_plurals(line: &str) -> Option<String> {
    let split = SplitLine::new(line);
    if !split.code.contains("ls{") {
        return None;
    }

    let fixed = GLOSSARY_PLURAL_PATTERN.replace_all(split.code, r"\${command}pl{${key}}");
    if fixed == split.code {
        return None;
    }

    Some(split.join(&fixed))
}
