// First-person pronoun detection
use super::{LineContext, LineOutcome, LineRule};
use crate::patterns::context_snippet;
use crate::tables::PronounPack;
use review_types::{Category, IssueDetail, IssueRecord, Report};

/// Flags every first-person pronoun in the configured languages
pub struct PronounDetector {
    packs: Vec<PronounPack>,
}

impl PronounDetector {
    pub fn new(packs: Vec<PronounPack>) -> Self {
        Self { packs }
    }
}

impl LineRule for PronounDetector {
    fn name(&self) -> &str {
        "pronouns"
    }

    fn apply(&self, line: &str, ctx: &LineContext<'_>, report: &mut Report) -> LineOutcome {
        for pack in &self.packs {
            for pattern in &pack.patterns {
                for found in pattern.regex.find_iter(line) {
                    report.push(
                        Category::Pronouns,
                        IssueRecord::finding(
                            ctx.file,
                            ctx.line_number,
                            IssueDetail::Pronoun {
                                language: pack.language.clone(),
                                pattern: pattern.source.clone(),
                                matched_text: found.as_str().to_string(),
                            },
                            context_snippet(line),
                        ),
                    );
                }
            }
        }

        LineOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::ctx;

    fn detector(languages: &[&str]) -> PronounDetector {
        let languages: Vec<String> = languages.iter().map(|l| l.to_string()).collect();
        PronounDetector::new(PronounPack::for_languages(&languages).unwrap())
    }

    fn matches(report: &Report) -> Vec<(String, String)> {
        report
            .records(Category::Pronouns)
            .iter()
            .filter_map(|r| match &r.detail {
                IssueDetail::Pronoun {
                    language,
                    matched_text,
                    ..
                } => Some((language.clone(), matched_text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_detects_english_pronouns() {
        let mut report = Report::new();
        let outcome = detector(&["en"]).apply(
            "We show that our method beats theirs.\n",
            &ctx(4),
            &mut report,
        );

        assert_eq!(outcome, LineOutcome::Unchanged);
        let found = matches(&report);
        assert!(found.contains(&("en".to_string(), "We".to_string())));
        assert!(found.contains(&("en".to_string(), "our".to_string())));
        assert!(report.records(Category::Pronouns)
            .iter()
            .all(|r| r.line == Some(4) && !r.auto_fixable));
    }

    #[test]
    fn test_records_every_occurrence() {
        let mut report = Report::new();
        detector(&["en"]).apply("we think we can", &ctx(1), &mut report);
        assert_eq!(report.records(Category::Pronouns).len(), 2);
    }

    #[test]
    fn test_detects_portuguese_pronouns() {
        let mut report = Report::new();
        detector(&["pt-br"]).apply("Nós propomos o nosso método", &ctx(1), &mut report);

        let found = matches(&report);
        assert!(found.contains(&("pt-br".to_string(), "Nós".to_string())));
        assert!(found.contains(&("pt-br".to_string(), "nosso".to_string())));
    }

    #[test]
    fn test_ignores_words_containing_pronouns() {
        let mut report = Report::new();
        detector(&["en"]).apply("The museum houses several items.", &ctx(1), &mut report);
        assert!(report.records(Category::Pronouns).is_empty());
    }

    #[test]
    fn test_shared_word_is_reported_per_language() {
        let mut report = Report::new();
        detector(&["en", "pt-br"]).apply("tell me", &ctx(1), &mut report);
        assert_eq!(report.records(Category::Pronouns).len(), 2);
    }
}
