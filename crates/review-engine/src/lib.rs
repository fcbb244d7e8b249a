//! Line-oriented review engine for LaTeX sources
//!
//! A document is loaded into an owned line buffer, run through two structural
//! passes (section label insertion, itemize punctuation) and then folded line
//! by line through an ordered [`RuleChain`] of detectors and fixers. Every
//! detection and every applied fix lands in a [`Report`].

pub mod bibtex;
pub mod config;
pub mod document;
pub mod error;
pub mod oracle;
pub mod patterns;
pub mod regions;
pub mod rules;
pub mod splitter;
pub mod structural;
pub mod tables;

pub use bibtex::{load_bib_keys, BibKeySet};
pub use config::ReviewConfig;
pub use document::Document;
pub use error::{OracleError, ReviewError};
pub use oracle::{DictionaryOracle, WordListOracle};
pub use rules::underscore::UnderscoreScope;
pub use tables::{PronounPack, SafeFixTable};

use regions::RegionTracker;
use review_types::Report;
use rules::{LineContext, LineRule, RuleChain};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared, read-only inputs of a review run
#[derive(Clone)]
pub struct EngineOptions {
    /// Citation keys; the missing-entry check only runs when present
    pub bib_keys: Option<Arc<BibKeySet>>,
    pub safe_fixes: Arc<SafeFixTable>,
    pub oracle: Option<Arc<dyn DictionaryOracle>>,
    pub languages: Vec<String>,
    pub underscore_scope: UnderscoreScope,
    /// Analyze without writing documents back
    pub dry_run: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            bib_keys: None,
            safe_fixes: Arc::new(SafeFixTable::default()),
            oracle: None,
            languages: tables::SUPPORTED_LANGUAGES
                .iter()
                .map(|l| l.to_string())
                .collect(),
            underscore_scope: UnderscoreScope::default(),
            dry_run: false,
        }
    }
}

impl EngineOptions {
    /// Build the run inputs described by `config`.
    ///
    /// An unreadable bibliography or dictionary is not fatal: the run goes on
    /// with an empty key set or without spelling suggestions.
    pub fn from_config(config: &ReviewConfig) -> Result<Self, ReviewError> {
        let bib_keys = config
            .bibliography_path()
            .map(|path| Arc::new(load_bib_keys(&path)));

        let oracle = config.dictionary.as_deref().and_then(|path| {
            match WordListOracle::from_file(path, config.max_edit_distance) {
                Ok(oracle) => {
                    tracing::info!(path = %path.display(), words = oracle.len(), "loaded dictionary");
                    Some(Arc::new(oracle) as Arc<dyn DictionaryOracle>)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "spelling suggestions disabled");
                    None
                }
            }
        });

        Ok(Self {
            bib_keys,
            safe_fixes: Arc::new(SafeFixTable::with_extras(&config.safe_fixes)?),
            oracle,
            languages: config.languages.clone(),
            underscore_scope: config.underscore_scope,
            dry_run: config.dry_run,
        })
    }
}

/// Totals for a multi-document run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub documents: usize,
    pub changed: usize,
}

/// ReviewEngine entry point
pub struct ReviewEngine {
    chain: RuleChain,
    dry_run: bool,
}

impl ReviewEngine {
    pub fn new(options: EngineOptions) -> Result<Self, ReviewError> {
        let packs = PronounPack::for_languages(&options.languages)?;

        // Detectors first so they all read the line as it entered the chain
        let mut stages: Vec<Box<dyn LineRule>> = vec![
            Box::new(rules::references::UnresolvedReferenceDetector),
            Box::new(rules::references::RepeatedParenthesesDetector),
            Box::new(rules::pronouns::PronounDetector::new(packs)),
            Box::new(rules::apostrophes::ApostropheDetector),
            Box::new(rules::numeric::NumericConsistencyDetector),
        ];
        if let Some(keys) = options.bib_keys {
            stages.push(Box::new(rules::bibliography::MissingBibEntryDetector::new(keys)));
        }
        let fixers: Vec<Box<dyn LineRule>> = vec![
            // Runs first among fixers: it can turn a comment marker into content
            Box::new(rules::percentage::PercentageFixer),
            Box::new(rules::citations::DuplicateCitationFixer),
            Box::new(rules::spelling::SpellingFixer::new(
                options.safe_fixes,
                options.oracle,
            )),
            Box::new(rules::whitespace::DoubleWhitespaceFixer),
            Box::new(rules::glossary::GlossaryPluralFixer),
            Box::new(rules::underscore::UnderscoreFixer::new(
                options.underscore_scope,
            )),
        ];
        stages.extend(fixers);

        Ok(Self {
            chain: RuleChain::new(stages),
            dry_run: options.dry_run,
        })
    }

    pub fn chain(&self) -> &RuleChain {
        &self.chain
    }

    /// Run both structural passes and the rule chain over `document`.
    /// Returns whether the buffer changed.
    pub fn review_document(&self, document: &mut Document, report: &mut Report) -> bool {
        let file = document.file_id();
        let before = report.total();

        let labels = structural::insert_missing_labels(document, report);
        let itemized = structural::normalize_itemize_punctuation(document, report);
        let mut changed = labels > 0 || itemized;

        let mut regions = RegionTracker::new();
        for index in 0..document.len() {
            let rewritten = match document.line(index) {
                Some(line) => {
                    let ctx = LineContext {
                        file: &file,
                        line_number: index + 1,
                        region: regions.advance(line),
                    };
                    self.chain.run(line, &ctx, report)
                }
                None => None,
            };

            if let Some(rewritten) = rewritten {
                document.set_line(index, rewritten);
                changed = true;
            }
        }

        tracing::info!(
            file = %file,
            lines = document.len(),
            issues = report.total() - before,
            labels,
            changed,
            "reviewed document"
        );
        changed
    }

    /// Review in-memory text, returning the reviewed text and the changed flag
    pub fn review_text(&self, file: &str, text: &str, report: &mut Report) -> (String, bool) {
        let mut document = Document::from_text(file, text);
        let changed = self.review_document(&mut document, report);
        (document.to_text(), changed)
    }

    /// Load, review and (unless in dry-run mode) persist one file.
    /// The file is only written when something changed.
    pub fn review_file(&self, path: &Path, report: &mut Report) -> Result<bool, ReviewError> {
        let mut document = Document::load(path)?;
        let changed = self.review_document(&mut document, report);

        if changed && !self.dry_run {
            document.persist()?;
        } else if changed {
            tracing::info!(file = %document.path().display(), "dry run, changes not written");
        }

        Ok(changed)
    }

    /// Review `paths` in order, merging each file's report into `report`.
    /// The first I/O failure aborts the run.
    pub fn review_files(
        &self,
        paths: &[PathBuf],
        report: &mut Report,
    ) -> Result<ReviewSummary, ReviewError> {
        let mut summary = ReviewSummary::default();
        for path in paths {
            let mut file_report = Report::new();
            if self.review_file(path, &mut file_report)? {
                summary.changed += 1;
            }
            summary.documents += 1;
            report.merge(file_report);
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use review_types::{Category, Correction, IssueDetail};

    fn engine() -> ReviewEngine {
        ReviewEngine::new(EngineOptions {
            bib_keys: Some(Arc::new(["a", "b", "smith2020"].into_iter().collect())),
            ..EngineOptions::default()
        })
        .unwrap()
    }

    fn review(text: &str) -> (String, Report, bool) {
        let mut report = Report::new();
        let (out, changed) = engine().review_text("paper.tex", text, &mut report);
        (out, report, changed)
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(
            engine().chain().names(),
            vec![
                "unresolved_references",
                "repeated_parentheses",
                "pronouns",
                "apostrophes",
                "numeric_consistency",
                "missing_bib_entries",
                "percentage_misuse",
                "duplicate_citations",
                "spelling",
                "double_whitespace",
                "glossary_plural",
                "underscore_misuse",
            ]
        );
    }

    #[test]
    fn test_section_without_label() {
        let (out, report, changed) = review("\\section{My Results}\nBody text.\n");

        assert!(changed);
        assert_eq!(out, "\\section{My Results}\n\\label{sec:my-results}\nBody text.\n");
        match &report.records(Category::MissingSectionLabel)[0].detail {
            IssueDetail::SectionLabel {
                generated_label, ..
            } => assert_eq!(generated_label, "\\label{sec:my-results}"),
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_citation() {
        let (out, report, changed) = review("\\cite{a,b,a}\n");

        assert!(changed);
        assert_eq!(out, "\\cite{a,b}\n");
        let records = report.records(Category::DuplicateCitations);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].detail,
            IssueDetail::Rewrite {
                before: "\\cite{a,b,a}".to_string(),
                after: "\\cite{a,b}".to_string(),
            }
        );
    }

    #[test]
    fn test_percentage_and_spelling() {
        let (out, report, _) = review("10% of teh sample\n");

        assert_eq!(out, "10 \\% of the sample\n");
        assert_eq!(report.records(Category::PercentageMisuse).len(), 1);

        let spelling = report.records(Category::Spelling);
        assert_eq!(spelling.len(), 1);
        match &spelling[0].detail {
            IssueDetail::SpellingFix { corrections, .. } => assert_eq!(
                corrections,
                &vec![Correction {
                    word: "teh".to_string(),
                    replacement: "the".to_string()
                }]
            ),
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_itemize_block() {
        let text = "\\begin{itemize}\n\\item one.\n\\item two,\n\\item three\n\\end{itemize}\n";
        let (out, report, _) = review(text);

        assert_eq!(
            out,
            "\\begin{itemize}\n\\item one;\n\\item two,;\n\\item three.\n\\end{itemize}\n"
        );
        assert_eq!(report.records(Category::ItemizePunctuation).len(), 1);
    }

    #[test]
    fn test_percent_signs_in_list_items() {
        let text = "\\begin{itemize}\n\\item gain of 10%\n\\item loss of 5%\n\\end{itemize}\n";
        let (out, report, _) = review(text);

        assert_eq!(
            out,
            "\\begin{itemize}\n\\item gain of 10 \\%;\n\\item loss of 5 \\%.\n\\end{itemize}\n"
        );
        assert_eq!(report.records(Category::PercentageMisuse).len(), 2);
    }

    #[test]
    fn test_verbatim_headings_and_lists_are_untouched() {
        let text = "\\begin{verbatim}\n\\section{Demo}\n\\begin{itemize}\n\\item a\n\\end{itemize}\n\\end{verbatim}\n";
        let (out, report, changed) = review(text);
        assert!(!changed);
        assert_eq!(out, text);
        assert!(report.is_empty());
    }

    #[test]
    fn test_line_numbers_follow_insertions() {
        let (_, report, _) = review("\\section{A}\nsee Figure ??\n");
        assert_eq!(report.records(Category::UnresolvedReferences)[0].line, Some(3));
    }

    #[test]
    fn test_detectors_see_the_original_line() {
        let (_, report, _) = review("\\cite{a,a,missing}\n");
        assert_eq!(report.records(Category::MissingBibEntries).len(), 1);
        assert_eq!(report.records(Category::DuplicateCitations).len(), 1);
    }

    #[test]
    fn test_verbatim_blocks_are_not_rewritten() {
        let text = "\\begin{verbatim}\nteh  raw_text 5%\n\\end{verbatim}\n";
        let (out, _, changed) = review(text);
        assert!(!changed);
        assert_eq!(out, text);
    }

    #[test]
    fn test_clean_document_is_unchanged() {
        let text = "\\section{Intro}\n\\label{sec:intro}\nThe results hold.\n";
        let (out, report, changed) = review(text);
        assert!(!changed);
        assert_eq!(out, text);
        assert!(report.is_empty());
    }

    #[test]
    fn test_citations_unchecked_without_bibliography() {
        let engine = ReviewEngine::new(EngineOptions::default()).unwrap();
        assert!(!engine.chain().names().contains(&"missing_bib_entries"));

        let mut report = Report::new();
        engine.review_text("p.tex", "\\cite{anything}\n", &mut report);
        assert!(report.records(Category::MissingBibEntries).is_empty());
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let options = EngineOptions {
            languages: vec!["xx".to_string()],
            ..EngineOptions::default()
        };
        assert!(matches!(
            ReviewEngine::new(options),
            Err(ReviewError::Config(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::splitter::SplitLine;
    use proptest::prelude::*;

    fn fragment() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "the model",
            "teh",
            "10%",
            "5\\%",
            "a  b",
            "file_name",
            "$x_i$",
            "\\cite{a,b,a}",
            "\\gls{cnn}s",
            "\\ref{fig:a_b}",
            "occured",
            "We",
            "0.25",
            "((x))",
        ])
    }

    fn code_line() -> impl Strategy<Value = String> {
        prop::collection::vec(fragment(), 1..6).prop_map(|parts| parts.join(" "))
    }

    fn itemize_block() -> impl Strategy<Value = String> {
        prop::collection::vec(code_line(), 1..4).prop_map(|items| {
            let items: Vec<String> = items.iter().map(|item| format!("\\item {}", item)).collect();
            format!("\\begin{{itemize}}\n{}\n\\end{{itemize}}", items.join("\n"))
        })
    }

    fn document() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                4 => code_line(),
                1 => "[A-Z][a-z]{1,8}".prop_map(|t| format!("\\section{{{}}}", t)),
                1 => itemize_block(),
            ],
            0..8,
        )
        .prop_map(|lines| lines.into_iter().map(|l| l + "\n").collect())
    }

    proptest! {
        #[test]
        fn review_is_idempotent(text in document()) {
            let engine = ReviewEngine::new(EngineOptions::default()).unwrap();
            let (once, _) = engine.review_text("p.tex", &text, &mut Report::new());

            let mut report = Report::new();
            let (twice, changed) = engine.review_text("p.tex", &once, &mut report);

            prop_assert_eq!(&twice, &once);
            prop_assert!(!changed);
            prop_assert_eq!(report.applied_fixes(), 0);
        }

        #[test]
        fn percent_signs_stay_content(text in document()) {
            let engine = ReviewEngine::new(EngineOptions::default()).unwrap();
            let (out, _) = engine.review_text("p.tex", &text, &mut Report::new());

            prop_assert_eq!(out.matches('%').count(), text.matches('%').count());
            for line in out.lines() {
                prop_assert!(!SplitLine::new(line).has_comment(), "comment in {:?}", line);
            }
        }

        #[test]
        fn comments_survive_review(
            code in code_line().prop_filter("bare percent starts the comment", |c| !c.contains("10%")),
            comment in "[a-z_ ]{0,20}",
        ) {
            let line = format!("{} % {}  teh_x\n", code, comment);
            let engine = ReviewEngine::new(EngineOptions::default()).unwrap();
            let (out, _) = engine.review_text("p.tex", &line, &mut Report::new());

            let original = SplitLine::new(&line).comment;
            let reviewed = SplitLine::new(&out).comment;
            prop_assert_eq!(reviewed, original);
        }
    }
}
