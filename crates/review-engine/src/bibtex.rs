//! Bibliography key loading
use crate::patterns::BIB_ENTRY_PATTERN;
use std::collections::HashSet;
use std::path::Path;

/// Entry types that do not define citable keys
const NON_ENTRY_TYPES: &[&str] = &["string", "comment", "preamble"];

/// Immutable set of citation keys parsed from a `.bib` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibKeySet {
    keys: HashSet<String>,
}

impl BibKeySet {
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parse every `@type{key,` entry header
    pub fn parse(content: &str) -> Self {
        BIB_ENTRY_PATTERN
            .captures_iter(content)
            .filter(|caps| {
                let entry_type = caps[0]
                    .trim_start_matches('@')
                    .split(|c: char| c == '{' || c.is_whitespace())
                    .next()
                    .unwrap_or_default()
                    .to_lowercase();
                !NON_ENTRY_TYPES.contains(&entry_type.as_str())
            })
            .map(|caps| caps["key"].to_string())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for BibKeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Load citation keys from a `.bib` file.
///
/// Never fails: an unreadable file yields an empty set and a warning, so every
/// citation will then be reported as missing.
pub fn load_bib_keys(path: &Path) -> BibKeySet {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let keys = BibKeySet::parse(&content);
            tracing::info!(path = %path.display(), keys = keys.len(), "loaded bibliography");
            keys
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "bibliography unreadable, using empty key set");
            BibKeySet::default()
        }
    }
}
