//! Per-line review rules
//!
//! Detectors only append records. Fixers may rewrite the line and append
//! exactly the records describing what they changed. The [`RuleChain`] folds
//! a line through every rule in order, so each rule sees the output of the
//! rules before it.

pub mod apostrophes;
pub mod bibliography;
pub mod citations;
pub mod glossary;
pub mod numeric;
pub mod percentage;
pub mod pronouns;
pub mod references;
pub mod spelling;
pub mod underscore;
pub mod whitespace;

use crate::regions::Region;
use review_types::Report;
use std::borrow::Cow;

/// Where the line under review sits in its document
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub file: &'a str,
    /// 1-based, counted after structural insertions
    pub line_number: usize,
    pub region: Region,
}

/// Result of applying a rule to one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line is byte-identical to the input
    Unchanged,
    /// The line was rewritten and the fix recorded
    Rewritten(String),
}

impl LineOutcome {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, LineOutcome::Rewritten(_))
    }
}

/// Trait for line rules
pub trait LineRule: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Check one line, appending findings to `report`
    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome;
}

/// Ordered sequence of rules applied left to right
pub struct RuleChain {
    rules: Vec<Box<dyn LineRule>>,
}

impl RuleChain {
    pub fn new(rules: Vec<Box<dyn LineRule>>) -> Self {
        Self { rules }
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Thread `line` through every rule. Returns the final line when any rule
    /// rewrote it.
    pub fn run(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> Option<String> {
        let mut current: Cow<'_, str> = Cow::Borrowed(line);

        for rule in &self.rules {
            if let LineOutcome::Rewritten(rewritten) = rule.apply(&current, ctx, report) {
                tracing::debug!(
                    rule = rule.name(),
                    file = ctx.file,
                    line = ctx.line_number,
                    "rule rewrote line"
                );
                current = Cow::Owned(rewritten);
            }
        }

        match current {
            Cow::Borrowed(_) => None,
            Cow::Owned(rewritten) => Some(rewritten),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn ctx(line_number: usize) -> LineContext<'static> {
        LineContext {
            file: "test.tex",
            line_number,
            region: Region::Text,
        }
    }

    pub fn ctx_in(region: Region) -> LineContext<'static> {
        LineContext {
            file: "test.tex",
            line_number: 1,
            region,
        }
    }

    /// Apply a rule and return the resulting line
    pub fn run_rule(rule: &dyn LineRule, line: &str, report: &mut Report) -> String {
        match rule.apply(line, &ctx(1), report) {
            LineOutcome::Unchanged => line.to_string(),
            LineOutcome::Rewritten(rewritten) => rewritten,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::ctx;
    use super::*;
    use review_types::{Category, IssueDetail, IssueRecord};

    struct Upper;
    struct Exclaim;
    struct Count;

    impl LineRule for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn apply(&self, line: &str, _ctx: &LineContext<'_>, _report: &mut Report) -> LineOutcome {
            let upper = line.to_uppercase();
            if upper == line {
                LineOutcome::Unchanged
            } else {
                LineOutcome::Rewritten(upper)
            }
        }
    }

    impl LineRule for Exclaim {
        fn name(&self) -> &str {
            "exclaim"
        }

        fn apply(&self, line: &str, _ctx: &LineContext<'_>, _report: &mut Report) -> LineOutcome {
            LineOutcome::Rewritten(format!("{}!", line))
        }
    }

    impl LineRule for Count {
        fn name(&self) -> &str {
            "count"
        }

        fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
            report.push(
                Category::Apostrophes,
                IssueRecord::finding(
                    ctx.file,
                    ctx.line_number,
                    IssueDetail::Matched {
                        matched_text: line.to_string(),
                    },
                    None,
                ),
            );
            LineOutcome::Unchanged
        }
    }

    #[test]
    fn test_chain_threads_output_forward() {
        let chain = RuleChain::new(vec![Box::new(Upper), Box::new(Exclaim), Box::new(Count)]);
        let mut report = Report::new();

        let out = chain.run("abc", &ctx(1), &mut report);

        assert_eq!(out.as_deref(), Some("ABC!"));
        let seen = &report.records(Category::Apostrophes)[0];
        assert_eq!(
            seen.detail,
            IssueDetail::Matched {
                matched_text: "ABC!".to_string()
            }
        );
    }

    #[test]
    fn test_chain_reports_no_change() {
        let chain = RuleChain::new(vec![Box::new(Upper), Box::new(Count)]);
        let mut report = Report::new();

        assert_eq!(chain.run("ABC", &ctx(1), &mut report), None);
        assert_eq!(chain.names(), vec!["upper", "count"]);
    }
}
