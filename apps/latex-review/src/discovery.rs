//! Source file discovery

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into
const IGNORED_DIRS: &[&str] = &["node_modules", "_minted"];

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),
}

/// Every file under `root` with one of `extensions`, sorted by path.
///
/// A file root is returned as-is. Hidden entries (including VCS metadata
/// directories) are skipped; unreadable entries are logged and skipped.
pub fn discover_documents(
    root: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::PathNotFound(root.to_path_buf()));
    }

    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    documents.push(entry.into_path());
                }
            }
            Err(e) => {
                tracing::warn!("Error accessing entry: {}", e);
            }
        }
    }

    documents.sort();
    Ok(documents)
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && IGNORED_DIRS.contains(&&*name))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(&ext)))
}
