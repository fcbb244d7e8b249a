//! Review configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or no
//! file at all) is a valid configuration. The command line overrides
//! individual fields after loading.

use crate::error::ReviewError;
use crate::rules::underscore::UnderscoreScope;
use crate::tables::SUPPORTED_LANGUAGES;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Root of the LaTeX project (a directory, or a single file)
    pub root: PathBuf,
    /// File extensions treated as LaTeX sources, without the dot
    pub extensions: Vec<String>,
    /// Report output path; relative paths resolve against `root`
    pub report: PathBuf,
    /// Bibliography file; relative paths resolve against `root`
    pub bibliography: Option<PathBuf>,
    /// Word list for spelling suggestions; suggestions are off without one
    pub dictionary: Option<PathBuf>,
    /// Maximum edit distance for spelling suggestions (1 or 2)
    pub max_edit_distance: u8,
    /// Pronoun language packs to check
    pub languages: Vec<String>,
    pub underscore_scope: UnderscoreScope,
    /// Analyze and report without writing any document back
    pub dry_run: bool,
    /// Extra misspelling -> correction entries on top of the built-in table
    pub safe_fixes: BTreeMap<String, String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec!["tex".to_string()],
            report: PathBuf::from("latex_review_report.json"),
            bibliography: Some(PathBuf::from("main.bib")),
            dictionary: None,
            max_edit_distance: 1,
            languages: SUPPORTED_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            underscore_scope: UnderscoreScope::default(),
            dry_run: false,
            safe_fixes: BTreeMap::new(),
        }
    }
}

/// Parse and validate configuration from a TOML string
impl FromStr for ReviewConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }
}

impl ReviewConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        content
            .parse::<Self>()
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ReviewError> {
        if !(1..=2).contains(&self.max_edit_distance) {
            return Err(ReviewError::Config(format!(
                "max_edit_distance must be 1 or 2, got {}",
                self.max_edit_distance
            )));
        }

        if self.extensions.is_empty() {
            return Err(ReviewError::Config(
                "at least one source extension is required".to_string(),
            ));
        }

        if let Some(unknown) = self
            .languages
            .iter()
            .find(|language| !SUPPORTED_LANGUAGES.contains(&language.as_str()))
        {
            return Err(ReviewError::Config(format!(
                "unsupported pronoun language '{}' (supported: {})",
                unknown,
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }

        if let Some(key) = self
            .safe_fixes
            .keys()
            .find(|key| key.is_empty() || key.chars().any(|c| !c.is_alphabetic()))
        {
            return Err(ReviewError::Config(format!(
                "safe fix '{}' must be a single word",
                key
            )));
        }

        Ok(())
    }

    pub fn report_path(&self) -> PathBuf {
        self.resolve(&self.report)
    }

    pub fn bibliography_path(&self) -> Option<PathBuf> {
        self.bibliography.as_deref().map(|path| self.resolve(path))
    }

    /// Directory that relative paths resolve against: the root itself, or the
    /// parent of a single-file root
    fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(Path::new("."))
        } else {
            &self.root
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReviewConfig::from_str("").unwrap();
        assert_eq!(config, ReviewConfig::default());
        assert_eq!(config.languages, vec!["en", "pt-br"]);
        assert_eq!(config.underscore_scope, UnderscoreScope::Code);
    }

    #[test]
    fn test_str_parse_validates() {
        let config: ReviewConfig = "dry_run = true".parse().unwrap();
        assert!(config.dry_run);
        assert!("max_edit_distance = 0".parse::<ReviewConfig>().is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            root = "paper"
            extensions = ["tex", "ltx"]
            report = "out/report.json"
            bibliography = "refs.bib"
            dictionary = "/usr/share/dict/words"
            max_edit_distance = 2
            languages = ["en"]
            underscore_scope = "line"
            dry_run = true

            [safe_fixes]
            acheive = "achieve"
        "#;

        let config = ReviewConfig::from_str(toml).unwrap();
        assert_eq!(config.root, PathBuf::from("paper"));
        assert_eq!(config.extensions, vec!["tex", "ltx"]);
        assert_eq!(config.report_path(), PathBuf::from("paper/out/report.json"));
        assert_eq!(config.bibliography_path(), Some(PathBuf::from("paper/refs.bib")));
        assert_eq!(config.dictionary, Some(PathBuf::from("/usr/share/dict/words")));
        assert_eq!(config.max_edit_distance, 2);
        assert_eq!(config.underscore_scope, UnderscoreScope::Line);
        assert!(config.dry_run);
        assert_eq!(config.safe_fixes.get("acheive").map(String::as_str), Some("achieve"));
    }

    #[test]
    fn test_rejects_bad_edit_distance() {
        let err = ReviewConfig::from_str("max_edit_distance = 3").unwrap_err();
        assert!(format!("{:#}", err).contains("max_edit_distance"));
    }

    #[test]
    fn test_rejects_unknown_language() {
        let err = ReviewConfig::from_str("languages = [\"fr\"]").unwrap_err();
        assert!(format!("{:#}", err).contains("unsupported pronoun language 'fr'"));
    }

    #[test]
    fn test_rejects_multi_word_safe_fix() {
        let err = ReviewConfig::from_str("[safe_fixes]\n\"a lot\" = \"alot\"").unwrap_err();
        assert!(format!("{:#}", err).contains("single word"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = ReviewConfig::from_file("/no/such/review.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
