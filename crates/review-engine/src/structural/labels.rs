// Missing \label insertion after sectioning commands
use crate::document::Document;
use crate::patterns::{context_snippet, HEADING_PATTERN, LABEL_PATTERN};
use crate::regions::{Region, RegionTracker};
use crate::splitter::{is_comment_line, split_line_ending, SplitLine};
use review_types::{Category, IssueDetail, IssueRecord, Report};
use std::collections::HashSet;

/// Insert `\label{sec:<id>}` after every heading that lacks one.
///
/// The cursor advances by two after an insertion so the new line is never
/// revisited. Headings inside verbatim blocks are left alone. Returns the
/// number of inserted lines.
pub fn insert_missing_labels(document: &mut Document, report: &mut Report) -> usize {
    let file = document.file_id();
    let mut seen = HashSet::new();
    let mut inserted = 0;
    let mut cursor = 0;
    let mut regions = RegionTracker::new();

    while cursor < document.len() {
        let verbatim = document
            .line(cursor)
            .is_some_and(|line| regions.advance(line) == Region::Verbatim);
        if verbatim {
            cursor += 1;
            continue;
        }

        match label_for_heading(document, cursor) {
            Some(pending) => {
                if !seen.insert(pending.id.clone()) {
                    tracing::warn!(
                        file = %file,
                        line = cursor + 1,
                        label = %pending.generated_label,
                        "generated label repeats an earlier heading"
                    );
                }

                if let Some(heading) = pending.heading_rewrite {
                    document.set_line(cursor, heading);
                }
                document.insert_after(cursor, pending.label_line);

                report.push(
                    Category::MissingSectionLabel,
                    IssueRecord::applied(
                        &file,
                        Some(cursor + 1),
                        IssueDetail::SectionLabel {
                            command: pending.command,
                            matched_text: pending.matched_text,
                            generated_label: pending.generated_label,
                        },
                        pending.context,
                    ),
                );

                inserted += 1;
                cursor += 2;
            }
            None => cursor += 1,
        }
    }

    if inserted > 0 {
        tracing::debug!(file = %file, inserted, "inserted section labels");
    }
    inserted
}

struct PendingLabel {
    id: String,
    command: String,
    matched_text: String,
    generated_label: String,
    context: Option<String>,
    label_line: String,
    /// The heading with a terminator added, when it was the unterminated last line
    heading_rewrite: Option<String>,
}

fn label_for_heading(document: &Document, index: usize) -> Option<PendingLabel> {
    let line = document.line(index)?;
    if is_comment_line(line) {
        return None;
    }

    let code = SplitLine::new(line).code;
    let caps = HEADING_PATTERN.captures(code)?;
    if LABEL_PATTERN.is_match(code) || next_line_has_label(document, index) {
        return None;
    }

    let id = derive_label_id(&caps["title"]);
    if id.is_empty() {
        return None;
    }

    let indent = &line[..line.len() - line.trim_start().len()];
    let generated_label = format!("\\label{{sec:{}}}", id);
    let (body, ending) = split_line_ending(line);

    let (label_line, heading_rewrite) = if ending.is_empty() {
        (
            format!("{}{}", indent, generated_label),
            Some(format!("{}\n", body)),
        )
    } else {
        (format!("{}{}{}", indent, generated_label, ending), None)
    };

    Some(PendingLabel {
        id,
        command: format!("{}{}", &caps["command"], &caps["star"]),
        matched_text: caps[0].to_string(),
        generated_label,
        context: context_snippet(line),
        label_line,
        heading_rewrite,
    })
}

fn next_line_has_label(document: &Document, index: usize) -> bool {
    document
        .line(index + 1)
        .is_some_and(|next| !is_comment_line(next) && LABEL_PATTERN.is_match(SplitLine::new(next).code))
}

/// Label identifier for a heading title: lowercase, spaces to hyphens, only
/// `[a-z0-9-]` kept, hyphen runs collapsed and trimmed
pub fn derive_label_id(title: &str) -> String {
    let mut id = String::with_capacity(title.len());
    for ch in title.to_lowercase().replace(' ', "-").chars() {
        let keep = ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-';
        if !keep || (ch == '-' && id.ends_with('-')) {
            continue;
        }
        id.push(ch);
    }
    id.trim_matches('-').to_string()
}
