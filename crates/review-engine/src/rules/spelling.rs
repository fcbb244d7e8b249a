// Safe spelling fixes and dictionary suggestions
use super::{LineContext, LineOutcome, LineRule};
use crate::oracle::DictionaryOracle;
use crate::patterns::{context_snippet, in_spans, protected_spans, WORD_PATTERN};
use crate::regions::Region;
use crate::splitter::{is_escaped, strip_line_ending, SplitLine};
use crate::tables::SafeFixTable;
use review_types::{Category, Correction, IssueDetail, IssueRecord, Report};
use std::sync::Arc;

/// Applies the safe-fix table to the code segment of a line and, when an
/// oracle is available, suggests corrections for unknown words without
/// touching the text
pub struct SpellingFixer {
    table: Arc<SafeFixTable>,
    oracle: Option<Arc<dyn DictionaryOracle>>,
}

impl SpellingFixer {
    pub fn new(table: Arc<SafeFixTable>, oracle: Option<Arc<dyn DictionaryOracle>>) -> Self {
        Self { table, oracle }
    }

    fn suggest(&self, code: &str, line: &str, ctx: &LineContext<'_>, report: &mut Report) {
        let Some(oracle) = &self.oracle else {
            return;
        };

        let protected = protected_spans(code);
        for found in WORD_PATTERN.find_iter(code) {
            if is_escaped(code, found.start()) || in_spans(&protected, found.start()) {
                continue;
            }

            let word = found.as_str();
            let lower = word.to_lowercase();
            if self.table.contains(&lower) {
                continue;
            }

            match lookup(oracle.as_ref(), &lower) {
                Ok(Some(suggestion)) => report.push(
                    Category::Spelling,
                    IssueRecord::finding(
                        ctx.file,
                        ctx.line_number,
                        IssueDetail::SpellingSuggestion {
                            word: word.to_string(),
                            suggestion,
                        },
                        context_snippet(line),
                    ),
                ),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(word = %lower, error = %err, "dictionary lookup failed");
                }
            }
        }
    }
}

/// A suggestion for an unknown word that differs from the word itself
fn lookup(
    oracle: &dyn DictionaryOracle,
    lower: &str,
) -> Result<Option<String>, crate::error::OracleError> {
    if oracle.known(lower)? {
        return Ok(None);
    }
    Ok(oracle
        .correct(lower)?
        .filter(|suggestion| suggestion.to_lowercase() != lower))
}

/// Apply the safe-fix table to everything but math and reference arguments
fn fix_outside_spans(table: &SafeFixTable, code: &str) -> (String, Vec<Correction>) {
    let mut spans = protected_spans(code);
    spans.sort_by_key(|span| span.start);

    let mut out = String::with_capacity(code.len());
    let mut corrections = Vec::new();
    let mut cursor = 0;

    for span in spans {
        if span.end <= cursor {
            continue;
        }
        let start = span.start.max(cursor);
        let (fixed, found) = table.apply(&code[cursor..start]);
        out.push_str(&fixed);
        out.push_str(&code[start..span.end]);
        corrections.extend(found);
        cursor = span.end;
    }

    let (fixed, found) = table.apply(&code[cursor..]);
    out.push_str(&fixed);
    corrections.extend(found);

    (out, corrections)
}

impl LineRule for SpellingFixer {
    fn name(&self) -> &str {
        "spelling"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if ctx.region == Region::Verbatim {
            return LineOutcome::Unchanged;
        }

        let split = SplitLine::new(line);
        let (code, corrections) = fix_outside_spans(&self.table, split.code);

        let outcome = if corrections.is_empty() {
            LineOutcome::Unchanged
        } else {
            report.push(
                Category::Spelling,
                IssueRecord::applied(
                    ctx.file,
                    Some(ctx.line_number),
                    IssueDetail::SpellingFix {
                        before: strip_line_ending(split.code).to_string(),
                        after: strip_line_ending(&code).to_string(),
                        corrections,
                    },
                    context_snippet(line),
                ),
            );
            LineOutcome::Rewritten(split.join(&code))
        };

        self.suggest(&code, line, ctx, report);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use crate::oracle::WordListOracle;
    use crate::rules::test_support::{ctx, run_rule};
    use pretty_assertions::assert_eq;

    fn fixer() -> SpellingFixer {
        SpellingFixer::new(Arc::new(SafeFixTable::default()), None)
    }

    fn fixer_with(words: &str) -> SpellingFixer {
        let oracle = WordListOracle::parse(words, 1);
        SpellingFixer::new(Arc::new(SafeFixTable::default()), Some(Arc::new(oracle)))
    }

    struct FailingOracle;

    impl DictionaryOracle for FailingOracle {
        fn known(&self, _word: &str) -> Result<bool, OracleError> {
            Err(OracleError::Lookup("backend down".to_string()))
        }

        fn correct(&self, _word: &str) -> Result<Option<String>, OracleError> {
            Err(OracleError::Lookup("backend down".to_string()))
        }
    }

    #[test]
    fn test_safe_fix_preserves_case() {
        let mut report = Report::new();
        let out = run_rule(&fixer(), "Teh results and TEH end\n", &mut report);
        assert_eq!(out, "The results and THE end\n");
    }

    #[test]
    fn test_safe_fix_record() {
        let mut report = Report::new();
        let outcome = fixer().apply("of teh sample\n", &ctx(5), &mut report);

        assert_eq!(outcome, LineOutcome::Rewritten("of the sample\n".to_string()));
        let records = report.records(Category::Spelling);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].detail,
            IssueDetail::SpellingFix {
                before: "of teh sample".to_string(),
                after: "of the sample".to_string(),
                corrections: vec![Correction {
                    word: "teh".to_string(),
                    replacement: "the".to_string()
                }],
            }
        );
    }

    #[test]
    fn test_comment_text_is_never_fixed() {
        let mut report = Report::new();
        let line = "clean text % teh typo stays\n";
        assert_eq!(fixer().apply(line, &ctx(1), &mut report), LineOutcome::Unchanged);
        assert!(report.is_empty());
    }

    #[test]
    fn test_reference_keys_and_math_are_not_fixed() {
        let mut report = Report::new();
        let line = "teh \\label{sec:teh} and $teh$\n";
        let out = run_rule(&fixer(), line, &mut report);
        assert_eq!(out, "the \\label{sec:teh} and $teh$\n");
    }

    #[test]
    fn test_oracle_suggestions_do_not_mutate() {
        let fixer = fixer_with("the\nmodel 10\nworks\n");
        let mut report = Report::new();
        let outcome = fixer.apply("the modl works\n", &ctx(2), &mut report);

        assert_eq!(outcome, LineOutcome::Unchanged);
        let records = report.records(Category::Spelling);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].detail,
            IssueDetail::SpellingSuggestion {
                word: "modl".to_string(),
                suggestion: "model".to_string()
            }
        );
        assert!(!records[0].auto_fixable);
        assert_eq!(records[0].applied_fix, None);
    }

    #[test]
    fn test_commands_math_and_keys_are_not_checked() {
        let fixer = fixer_with("see\n");
        let mut report = Report::new();
        fixer.apply("\\textbf{see} $\\alpha$ \\ref{fgr}\n", &ctx(1), &mut report);
        assert!(report.records(Category::Spelling).is_empty());
    }

    #[test]
    fn test_oracle_failures_are_swallowed() {
        let fixer = SpellingFixer::new(
            Arc::new(SafeFixTable::default()),
            Some(Arc::new(FailingOracle)),
        );
        let mut report = Report::new();
        let outcome = fixer.apply("anything goes\n", &ctx(1), &mut report);

        assert_eq!(outcome, LineOutcome::Unchanged);
        assert!(report.is_empty());
    }
}
