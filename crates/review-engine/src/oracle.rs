//! Dictionary oracle used for spelling suggestions
//!
//! The engine only asks two questions: is this lowercase word known, and
//! what is the best correction for it. Suggestions are never applied.

use crate::error::OracleError;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::Path;

/// Trait for dictionary lookups
pub trait DictionaryOracle: Send + Sync {
    /// Whether `word` (lowercase) is a dictionary word
    fn known(&self, word: &str) -> Result<bool, OracleError>;

    /// Best correction for `word` (lowercase), if any
    fn correct(&self, word: &str) -> Result<Option<String>, OracleError>;
}

/// Oracle backed by a word list with optional frequencies.
///
/// The file holds one entry per line: `word` or `word<whitespace>count`.
/// Blank lines and lines starting with `#` are ignored. Corrections are the
/// nearest known word by Damerau-Levenshtein distance, at most `max_distance`
/// (1 or 2) edits away.
#[derive(Debug, Clone)]
pub struct WordListOracle {
    words: HashMap<String, u64>,
    max_distance: u8,
}

impl WordListOracle {
    pub fn from_file(path: &Path, max_distance: u8) -> Result<Self, OracleError> {
        let content = std::fs::read_to_string(path).map_err(|source| OracleError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content, max_distance))
    }

    pub fn parse(content: &str, max_distance: u8) -> Self {
        let mut words = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let count = fields
                .next()
                .and_then(|c| c.parse::<u64>().ok())
                .unwrap_or(1);
            *words.entry(word.to_lowercase()).or_insert(0) += count;
        }
        Self::from_words(words, max_distance)
    }

    pub fn from_words<I, S>(words: I, max_distance: u8) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|(w, c)| (w.into(), c)).collect(),
            max_distance: max_distance.clamp(1, 2),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl DictionaryOracle for WordListOracle {
    fn known(&self, word: &str) -> Result<bool, OracleError> {
        Ok(self.words.contains_key(word))
    }

    /// Closest dictionary word; ties go to the more frequent word, then to the
    /// alphabetically first
    fn correct(&self, word: &str) -> Result<Option<String>, OracleError> {
        if self.words.contains_key(word) {
            return Ok(Some(word.to_string()));
        }

        let max = usize::from(self.max_distance);
        let length = word.chars().count();

        let best = self
            .words
            .iter()
            .filter(|(candidate, _)| candidate.chars().count().abs_diff(length) <= max)
            .filter_map(|(candidate, count)| {
                let distance = strsim::damerau_levenshtein(word, candidate);
                (distance <= max).then_some((distance, Reverse(*count), candidate))
            })
            .min()
            .map(|(_, _, candidate)| candidate.clone());

        Ok(best)
    }
}
