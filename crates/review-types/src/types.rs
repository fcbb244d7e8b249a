/// Closed set of issue categories, in report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UnresolvedReferences,
    RepeatedParentheses,
    Pronouns,
    Apostrophes,
    DecimalFormatting,
    DecimalPrecision,
    NumericRepresentation,
    MissingBibEntries,
    DuplicateCitations,
    Spelling,
    DoubleWhitespace,
    GlossaryPlural,
    UnderscoreMisuse,
    PercentageMisuse,
    MissingSectionLabel,
    ItemizePunctuation,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::UnresolvedReferences,
        Category::RepeatedParentheses,
        Category::Pronouns,
        Category::Apostrophes,
        Category::DecimalFormatting,
        Category::DecimalPrecision,
        Category::NumericRepresentation,
        Category::MissingBibEntries,
        Category::DuplicateCitations,
        Category::Spelling,
        Category::DoubleWhitespace,
        Category::GlossaryPlural,
        Category::UnderscoreMisuse,
        Category::PercentageMisuse,
        Category::MissingSectionLabel,
        Category::ItemizePunctuation,
    ];

    /// Serialized name, as it appears in the JSON report
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::UnresolvedReferences => "unresolved_references",
            Category::RepeatedParentheses => "repeated_parentheses",
            Category::Pronouns => "pronouns",
            Category::Apostrophes => "apostrophes",
            Category::DecimalFormatting => "decimal_formatting",
            Category::DecimalPrecision => "decimal_precision",
            Category::NumericRepresentation => "numeric_representation",
            Category::MissingBibEntries => "missing_bib_entries",
            Category::DuplicateCitations => "duplicate_citations",
            Category::Spelling => "spelling",
            Category::DoubleWhitespace => "double_whitespace",
            Category::GlossaryPlural => "glossary_plural",
            Category::UnderscoreMisuse => "underscore_misuse",
            Category::PercentageMisuse => "percentage_misuse",
            Category::MissingSectionLabel => "missing_section_label",
            Category::ItemizePunctuation => "itemize_punctuation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported finding or applied fix.
///
/// The category-specific fields live in [`IssueDetail`] and are flattened
/// into the record when serialized, so a spelling suggestion reads as
/// `{"file": .., "line": .., "word": .., "suggestion": .., ...}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IssueRecord {
    pub file: String,
    /// 1-based line number after structural insertions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(flatten)]
    pub detail: IssueDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub auto_fixable: bool,
    /// Only present on auto-fixable records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_fix: Option<bool>,
}

impl IssueRecord {
    /// A detection that the engine will not fix
    pub fn finding(
        file: impl Into<String>,
        line: usize,
        detail: IssueDetail,
        context: Option<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
            detail,
            context,
            auto_fixable: false,
            applied_fix: None,
        }
    }

    /// A fix that has already been applied to the document
    pub fn applied(
        file: impl Into<String>,
        line: Option<usize>,
        detail: IssueDetail,
        context: Option<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            detail,
            context,
            auto_fixable: true,
            applied_fix: Some(true),
        }
    }

    pub fn is_applied_fix(&self) -> bool {
        self.applied_fix == Some(true)
    }
}

/// Category-specific payload of an [`IssueRecord`]
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum IssueDetail {
    /// Generic match (apostrophes, unresolved references, repeated parentheses)
    Matched { matched_text: String },

    Pronoun {
        language: String,
        pattern: String,
        matched_text: String,
    },

    DecimalFormat { value: String, separator: char },

    DecimalPrecision { value: String, precision: usize },

    /// Line-level numeric representation problem, e.g. `mixed_decimal_and_percentage`
    Representation { issue: String },

    MissingBibEntry { key: String, citation: String },

    /// Before/after pair of an applied rewrite
    Rewrite { before: String, after: String },

    SpellingFix {
        before: String,
        after: String,
        corrections: Vec<Correction>,
    },

    SpellingSuggestion { word: String, suggestion: String },

    SectionLabel {
        command: String,
        matched_text: String,
        generated_label: String,
    },

    ItemizeBlock {
        begin_line: usize,
        end_line: usize,
        items: usize,
    },
}

/// One word replaced by the safe-spelling fixer
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Correction {
    pub word: String,
    pub replacement: String,
}
