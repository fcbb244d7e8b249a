//! Passes that need to see more than one line at a time
//!
//! Both run over the owned [`Document`](crate::document::Document) buffer
//! before the per-line rule chain, with an explicit cursor.

pub mod itemize;
pub mod labels;

pub use itemize::normalize_itemize_punctuation;
pub use labels::{derive_label_id, insert_missing_labels};
