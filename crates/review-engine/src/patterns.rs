//! Regex patterns shared by the review rules

use crate::splitter::is_escaped;
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

/// Commands whose brace argument is a key, label, path or URL rather than prose
pub const REFERENCE_COMMANDS: &[&str] = &[
    "label",
    "ref",
    "eqref",
    "autoref",
    "cref",
    "Cref",
    "pageref",
    "nameref",
    "hyperref",
    "bibitem",
    "url",
    "href",
    "includegraphics",
    "input",
    "include",
    "bibliography",
    "bibliographystyle",
    "gls",
    "glspl",
    "Gls",
    "Glspl",
    "acrshort",
    "acrlong",
    "acrfull",
    "usepackage",
    "documentclass",
    "begin",
    "end",
];

/// Table-like environments where column alignment spaces are intentional
pub const TABLE_ENVIRONMENTS: &[&str] = &["tabular", "table", "longtable"];

lazy_static! {
    /// `\cite`, `\citep`, `\citet*[p.~3]{a,b}` ...
    pub static ref CITE_PATTERN: Regex = Regex::new(
        r"\\cite[a-zA-Z]*\*?\s*(?:\[[^\]]*\]\s*){0,2}\{(?P<keys>[^}]*)\}"
    )
    .unwrap();

    /// Sectioning command with its title argument
    pub static ref HEADING_PATTERN: Regex = Regex::new(
        r"\\(?P<command>chapter|section|subsection|subsubsection)(?P<star>\*?)\s*\{(?P<title>[^}]+)\}"
    )
    .unwrap();

    pub static ref LABEL_PATTERN: Regex = Regex::new(r"\\label\s*\{[^}]+\}").unwrap();

    /// Itemize markers match whether or not the line is commented out
    pub static ref ITEMIZE_BEGIN_PATTERN: Regex =
        Regex::new(r"^(\s*)%?\s*\\begin\{itemize\}").unwrap();
    pub static ref ITEMIZE_END_PATTERN: Regex =
        Regex::new(r"^(\s*)%?\s*\\end\{itemize\}").unwrap();
    pub static ref ITEM_PATTERN: Regex =
        Regex::new(r"^(?P<indent>\s*)(?P<prefix>%?\s*\\item\s+)(?P<content>.*?)(?P<trailing>\s*)$")
            .unwrap();

    pub static ref TABLE_BOUNDARY_PATTERN: Regex = Regex::new(&format!(
        r"\\(?:begin|end)\{{(?:{})\*?\}}",
        TABLE_ENVIRONMENTS.join("|")
    ))
    .unwrap();

    pub static ref MULTI_SPACE_PATTERN: Regex = Regex::new(r" {2,}").unwrap();
    pub static ref SPACES_AFTER_TEXT_PATTERN: Regex = Regex::new(r"[^ \t]  +").unwrap();

    /// `\gls{key}s` written instead of `\glspl{key}`
    pub static ref GLOSSARY_PLURAL_PATTERN: Regex =
        Regex::new(r"\\(?P<command>gls|Gls)\{(?P<key>[^}]+)\}s\b").unwrap();

    pub static ref ESCAPED_PERCENT_AFTER_DIGIT: Regex = Regex::new(r"([0-9])\\%").unwrap();

    pub static ref DECIMAL_PATTERN: Regex = Regex::new(r"\b[0-9]+[.,][0-9]+\b").unwrap();
    pub static ref PERCENTAGE_PATTERN: Regex = Regex::new(r"\b[0-9]+\s*\\%").unwrap();
    pub static ref PROPORTION_PATTERN: Regex = Regex::new(r"\b0[.,][0-9]+\b").unwrap();

    pub static ref BIB_ENTRY_PATTERN: Regex =
        Regex::new(r"@\w+\s*\{\s*(?P<key>[^,\s]+)\s*,").unwrap();

    /// Alphabetic word candidates for dictionary lookups
    pub static ref WORD_PATTERN: Regex = Regex::new(r"\b[A-Za-z][A-Za-z']+\b").unwrap();

    /// `??` as left behind by an unresolved reference in copied output
    pub static ref UNRESOLVED_MARKER_PATTERN: Regex = Regex::new(r"\?\?").unwrap();

    /// Reference or citation command with an empty or `?` argument
    pub static ref EMPTY_REFERENCE_PATTERN: Regex = Regex::new(
        r"\\(?:ref|eqref|autoref|cref|Cref|pageref|nameref|cite[a-zA-Z]*)\*?\s*\{\s*\??\s*\}"
    )
    .unwrap();

    pub static ref REPEATED_PARENTHESES_PATTERN: Regex = Regex::new(r"\(\(|\)\)").unwrap();

    static ref INLINE_PAREN_MATH_PATTERN: Regex = Regex::new(r"\\\(.*?\\\)").unwrap();

    /// Any `*cite*` command (`\parencite`, `\nocite`, ...) or a listed one,
    /// with its optional arguments
    static ref REFERENCE_ARGUMENT_PATTERN: Regex = Regex::new(&format!(
        r"\\(?:[a-zA-Z]*cite[a-zA-Z]*|{})\*?\s*(?:\[[^\]]*\]\s*)*\{{[^}}]*\}}",
        REFERENCE_COMMANDS.join("|")
    ))
    .unwrap();
}

/// Byte ranges of `text` that rules must treat as opaque syntax: inline math
/// (`$...$`, `\(...\)`) and the arguments of reference-like commands.
pub fn protected_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = dollar_math_spans(text);
    spans.extend(INLINE_PAREN_MATH_PATTERN.find_iter(text).map(|m| m.range()));
    spans.extend(REFERENCE_ARGUMENT_PATTERN.find_iter(text).map(|m| m.range()));
    spans
}

pub fn in_spans(spans: &[Range<usize>], idx: usize) -> bool {
    spans.iter().any(|span| span.contains(&idx))
}

/// `$...$` spans, ignoring escaped `\$`; an unclosed `$` protects the rest of the line
fn dollar_math_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch != '$' || is_escaped(text, idx) {
            continue;
        }
        match open.take() {
            Some(start) => spans.push(start..idx + 1),
            None => open = Some(idx),
        }
    }

    if let Some(start) = open {
        spans.push(start..text.len());
    }

    spans
}

/// Trimmed line used as the `context` field of records
pub fn context_snippet(line: &str) -> Option<String> {
    Some(line.trim().to_string())
}
