//! Immutable lookup tables built once per run: the safe spelling fixes and
//! the first-person pronoun packs.

use crate::error::ReviewError;
use regex::{Captures, Regex};
use review_types::Correction;
use std::collections::BTreeMap;

/// Misspellings that are always wrong in academic prose
pub const DEFAULT_SAFE_FIXES: &[(&str, &str)] = &[
    ("futhermore", "furthermore"),
    ("seperate", "separate"),
    ("occured", "occurred"),
    ("teh", "the"),
    ("recieve", "receive"),
];

/// English first-person pronouns
pub const EN_PRONOUNS: &[&str] = &[
    "I",
    "me",
    "my",
    "mine",
    "myself",
    "we",
    "us",
    "our",
    "ours",
    "ourselves",
];

/// Brazilian Portuguese first-person pronouns
pub const PT_BR_PRONOUNS: &[&str] = &[
    "eu", "mim", "me", "meu", "minha", "meus", "minhas", "nós", "nos", "nossa", "nosso", "nossas",
    "nossos",
];

pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "pt-br"];

/// Lowercase misspelling -> correction, matched as whole words ignoring case
#[derive(Debug, Clone)]
pub struct SafeFixTable {
    fixes: BTreeMap<String, String>,
    pattern: Option<Regex>,
}

impl SafeFixTable {
    pub fn new<I, K, V>(entries: I) -> Result<Self, ReviewError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let fixes: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.as_ref().to_lowercase()))
            .filter(|(k, v)| !k.is_empty() && k != v)
            .collect();

        let pattern = if fixes.is_empty() {
            None
        } else {
            // Longest first so a key never shadows a longer key sharing its prefix
            let mut keys: Vec<&String> = fixes.keys().collect();
            keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
            let alternation = keys
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?)
        };

        Ok(Self { fixes, pattern })
    }

    /// Built-in defaults plus configured extras (extras win on conflict)
    pub fn with_extras(extras: &BTreeMap<String, String>) -> Result<Self, ReviewError> {
        let mut merged: BTreeMap<String, String> = DEFAULT_SAFE_FIXES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (k, v) in extras {
            merged.insert(k.to_lowercase(), v.to_lowercase());
        }
        Self::new(merged)
    }

    pub fn contains(&self, word_lowercase: &str) -> bool {
        self.fixes.contains_key(word_lowercase)
    }

    pub fn get(&self, word_lowercase: &str) -> Option<&str> {
        self.fixes.get(word_lowercase).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Replace every table key in `text`, preserving the capitalization style
    /// of each original token
    pub fn apply(&self, text: &str) -> (String, Vec<Correction>) {
        let Some(pattern) = &self.pattern else {
            return (text.to_string(), Vec::new());
        };

        let mut corrections = Vec::new();
        let replaced = pattern.replace_all(text, |caps: &Captures<'_>| {
            let word = &caps[0];
            let right = self.fixes.get(&word.to_lowercase()).map(String::as_str);
            match right {
                Some(right) => {
                    let replacement = preserve_case(word, right);
                    corrections.push(Correction {
                        word: word.to_string(),
                        replacement: replacement.clone(),
                    });
                    replacement
                }
                None => word.to_string(),
            }
        });

        (replaced.into_owned(), corrections)
    }
}

impl Default for SafeFixTable {
    fn default() -> Self {
        Self::with_extras(&BTreeMap::new()).expect("built-in safe fixes form a valid pattern")
    }
}

/// All-caps stays all-caps, initial capital stays capitalized, anything else
/// takes the lowercase replacement
pub fn preserve_case(original: &str, replacement: &str) -> String {
    let has_cased = original.chars().any(char::is_alphabetic);
    if has_cased && !original.chars().any(char::is_lowercase) {
        return replacement.to_uppercase();
    }

    if original.chars().next().is_some_and(char::is_uppercase) {
        return capitalize(replacement);
    }

    replacement.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// One language's pronoun patterns
#[derive(Debug, Clone)]
pub struct PronounPack {
    pub language: String,
    pub patterns: Vec<PronounPattern>,
}

#[derive(Debug, Clone)]
pub struct PronounPattern {
    /// Pattern source, reported alongside each match
    pub source: String,
    pub regex: Regex,
}

impl PronounPack {
    pub fn for_language(language: &str) -> Option<Self> {
        let words = match language {
            "en" => EN_PRONOUNS,
            "pt-br" => PT_BR_PRONOUNS,
            _ => return None,
        };

        let patterns = words
            .iter()
            .filter_map(|word| {
                let source = pronoun_pattern(word);
                Regex::new(&source)
                    .ok()
                    .map(|regex| PronounPattern { source, regex })
            })
            .collect();

        Some(Self {
            language: language.to_string(),
            patterns,
        })
    }

    /// Packs for every requested language, rejecting unknown ones
    pub fn for_languages(languages: &[String]) -> Result<Vec<Self>, ReviewError> {
        languages
            .iter()
            .map(|language| {
                Self::for_language(language).ok_or_else(|| {
                    ReviewError::Config(format!(
                        "unsupported pronoun language '{}' (supported: {})",
                        language,
                        SUPPORTED_LANGUAGES.join(", ")
                    ))
                })
            })
            .collect()
    }
}

/// Word-boundary pattern matching the lowercase and sentence-case forms.
/// `I` is only a pronoun in uppercase.
fn pronoun_pattern(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower == word {
        format!(
            r"\b(?:{}|{})\b",
            regex::escape(&lower),
            regex::escape(&capitalize(&lower))
        )
    } else {
        format!(r"\b{}\b", regex::escape(word))
    }
}
