use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the review of a document
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised by a dictionary oracle.
///
/// Lookup failures never abort a review; the spelling rule logs them and
/// treats the word as having no suggestion.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Failed to load dictionary {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dictionary lookup failed: {0}")]
    Lookup(String),
}
