//! Owned line buffer for one document under review

use crate::error::ReviewError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A source file held as lines, each keeping its own terminator.
///
/// Lines are rewritten in place or followed by inserted lines; they are never
/// reordered. Concatenating every line reproduces the file byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self, ReviewError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReviewError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(path, &text))
    }

    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier used in issue records
    pub fn file_id(&self) -> String {
        self.path.display().to_string()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Replace the line at `index`; out-of-range indices are ignored
    pub fn set_line(&mut self, index: usize, line: String) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = line;
        }
    }

    /// Insert a new line directly after `index`, shifting every later line by one
    pub fn insert_after(&mut self, index: usize, line: String) {
        let at = (index + 1).min(self.lines.len());
        self.lines.insert(at, line);
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Write the buffer back to its path.
    ///
    /// The text goes to a temporary file in the same directory which is then
    /// renamed over the original, so readers never see a partial file.
    pub fn persist(&self) -> Result<(), ReviewError> {
        let write_err = |source| ReviewError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(self.to_text().as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;

        if let Ok(metadata) = std::fs::metadata(&self.path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }

        temp.persist(&self.path)
            .map_err(|err| write_err(err.error))?;

        tracing::debug!(path = %self.path.display(), lines = self.lines.len(), "persisted document");
        Ok(())
    }
}
