// Duplicate citation key removal
use super::{LineContext, LineOutcome, LineRule};
use crate::patterns::{context_snippet, CITE_PATTERN};
use crate::regions::Region;
use crate::splitter::SplitLine;
use regex::Captures;
use review_types::{Category, IssueDetail, IssueRecord, Report};
use std::collections::HashSet;

/// Removes repeated keys inside a single citation command,
/// e.g. `\cite{a,b,a}` -> `\cite{a,b}`
pub struct DuplicateCitationFixer;

impl LineRule for DuplicateCitationFixer {
    fn name(&self) -> &str {
        "duplicate_citations"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        if ctx.region == Region::Verbatim {
            return LineOutcome::Unchanged;
        }

        let split = SplitLine::new(line);
        let (code, fixes) = dedupe_citations(split.code);
        if fixes.is_empty() {
            return LineOutcome::Unchanged;
        }

        for (before, after) in fixes {
            report.push(
                Category::DuplicateCitations,
                IssueRecord::applied(
                    ctx.file,
                    Some(ctx.line_number),
                    IssueDetail::Rewrite { before, after },
                    context_snippet(line),
                ),
            );
        }

        LineOutcome::Rewritten(split.join(&code))
    }
}

/// Rewrite every citation with duplicate keys. Returns the new code and the
/// `(before, after)` text of each rewritten citation.
pub fn dedupe_citations(code: &str) -> (String, Vec<(String, String)>) {
    let mut fixes = Vec::new();
    let rewritten = CITE_PATTERN.replace_all(code, |caps: &Captures<'_>| {
        let full = &caps[0];
        let (Some(whole), Some(keys)) = (caps.get(0), caps.name("keys")) else {
            return full.to_string();
        };
        match dedupe_keys(keys.as_str()) {
            Some(unique) => {
                let start = keys.start() - whole.start();
                let end = keys.end() - whole.start();
                let after = format!("{}{}{}", &full[..start], unique, &full[end..]);
                fixes.push((full.to_string(), after.clone()));
                after
            }
            None => full.to_string(),
        }
    });

    (rewritten.into_owned(), fixes)
}

/// Deduplicate a comma-separated key list keeping first occurrences.
/// `None` when there was nothing to remove.
pub fn dedupe_keys(list: &str) -> Option<String> {
    let keys: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect();
    if keys.len() <= 1 {
        return None;
    }

    let mut seen = HashSet::new();
    let unique: Vec<&str> = keys.iter().copied().filter(|k| seen.insert(*k)).collect();
    (unique.len() != keys.len()).then(|| unique.join(","))
}
