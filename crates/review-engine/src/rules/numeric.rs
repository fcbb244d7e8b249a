// Numeric formatting consistency detection
use super::{LineContext, LineOutcome, LineRule};
use crate::patterns::{DECIMAL_PATTERN, PERCENTAGE_PATTERN, PROPORTION_PATTERN};
use crate::splitter::is_comment_line;
use review_types::{Category, IssueDetail, IssueRecord, Report};

pub const MIXED_REPRESENTATION: &str = "mixed_decimal_and_percentage";

/// Records separator and precision of every decimal, and flags lines that mix
/// `0.NN` proportions with `NN \%` percentages
pub struct NumericConsistencyDetector;

/// A decimal token split into its separator and fractional digit count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalToken {
    pub value: String,
    pub separator: char,
    pub precision: usize,
}

impl LineRule for NumericConsistencyDetector {
    fn name(&self) -> &str {
        "numeric_consistency"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if is_comment_line(line) {
            return LineOutcome::Unchanged;
        }

        for token in extract_decimals(line) {
            report.push(
                Category::DecimalFormatting,
                IssueRecord::finding(
                    ctx.file,
                    ctx.line_number,
                    IssueDetail::DecimalFormat {
                        value: token.value.clone(),
                        separator: token.separator,
                    },
                    None,
                ),
            );
            report.push(
                Category::DecimalPrecision,
                IssueRecord::finding(
                    ctx.file,
                    ctx.line_number,
                    IssueDetail::DecimalPrecision {
                        value: token.value,
                        precision: token.precision,
                    },
                    None,
                ),
            );
        }

        if mixes_percentages_and_proportions(line) {
            report.push(
                Category::NumericRepresentation,
                IssueRecord::finding(
                    ctx.file,
                    ctx.line_number,
                    IssueDetail::Representation {
                        issue: MIXED_REPRESENTATION.to_string(),
                    },
                    None,
                ),
            );
        }

        LineOutcome::Unchanged
    }
}

pub fn extract_decimals(line: &str) -> Vec<DecimalToken> {
    DECIMAL_PATTERN
        .find_iter(line)
        .filter_map(|m| {
            let value = m.as_str();
            let sep_idx = value.find(['.', ','])?;
            let separator = value[sep_idx..].chars().next()?;
            Some(DecimalToken {
                value: value.to_string(),
                separator,
                precision: value.len() - sep_idx - 1,
            })
        })
        .collect()
}

pub fn mixes_percentages_and_proportions(line: &str) -> bool {
    PERCENTAGE_PATTERN.is_match(line) && PROPORTION_PATTERN.is_match(line)
}
