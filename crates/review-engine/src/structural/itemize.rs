// Itemize punctuation normalization
use crate::document::Document;
use crate::patterns::{ITEMIZE_BEGIN_PATTERN, ITEMIZE_END_PATTERN, ITEM_PATTERN};
use crate::regions::{Region, RegionTracker};
use crate::splitter::{split_line_ending, SplitLine};
use review_types::{Category, IssueDetail, IssueRecord, Report};

/// An itemize environment that has been opened but not yet closed
struct OpenBlock {
    begin: usize,
    items: Vec<usize>,
}

/// Make every item of each itemize block end with `;`, and the last with `.`.
///
/// Blocks nest: items belong to the innermost open block. Markers count even
/// when commented out, so commented lists stay consistent too. Verbatim blocks
/// are skipped. Returns whether any line changed.
pub fn normalize_itemize_punctuation(document: &mut Document, report: &mut Report) -> bool {
    let file = document.file_id();
    let mut open: Vec<OpenBlock> = Vec::new();
    let mut changed = false;
    let mut regions = RegionTracker::new();

    for index in 0..document.len() {
        let Some(line) = document.line(index) else {
            break;
        };
        if regions.advance(line) == Region::Verbatim {
            continue;
        }

        if ITEMIZE_BEGIN_PATTERN.is_match(line) {
            if !line.contains("\\end{itemize}") {
                open.push(OpenBlock {
                    begin: index,
                    items: Vec::new(),
                });
            }
            continue;
        }

        if ITEMIZE_END_PATTERN.is_match(line) {
            if let Some(block) = open.pop() {
                if close_block(document, &block) {
                    report.push(
                        Category::ItemizePunctuation,
                        IssueRecord::applied(
                            &file,
                            None,
                            IssueDetail::ItemizeBlock {
                                begin_line: block.begin + 1,
                                end_line: index + 1,
                                items: block.items.len(),
                            },
                            None,
                        ),
                    );
                    changed = true;
                }
            }
            continue;
        }

        if let Some(block) = open.last_mut() {
            if ITEM_PATTERN.is_match(split_line_ending(line).0) {
                block.items.push(index);
            }
        }
    }

    if !open.is_empty() {
        tracing::debug!(file = %file, unclosed = open.len(), "itemize blocks left open at end of document");
    }
    changed
}

/// Rewrite the item lines of a closed block; true if any line changed
fn close_block(document: &mut Document, block: &OpenBlock) -> bool {
    let mut changed = false;

    for (position, &index) in block.items.iter().enumerate() {
        let terminator = if position + 1 == block.items.len() { '.' } else { ';' };
        let rewritten = document
            .line(index)
            .and_then(|line| terminate_item(line, terminator));

        if let Some(rewritten) = rewritten {
            document.set_line(index, rewritten);
            changed = true;
        }
    }

    changed
}

/// The item line ending in `terminator`, or `None` when it already does or
/// the line is not an item with content.
///
/// One trailing `.` or `;` is replaced. A `%` directly after a digit counts as
/// item text. Indentation, the `\item` prefix
/// (commented or not), whitespace before a trailing comment, the comment and
/// the line terminator are kept.
pub fn terminate_item(line: &str, terminator: char) -> Option<String> {
    let (body, ending) = split_line_ending(line);
    let caps = ITEM_PATTERN.captures(body)?;
    let prefix_end = caps.name("prefix")?.end();

    // `10%` at the end of an item is a percent sign, not the start of a comment
    let split = SplitLine::reading_percent_signs(&body[prefix_end..]);
    let content = split.code.trim_end();
    if content.is_empty() {
        return None;
    }
    let gap = &split.code[content.len()..];
    let content = content
        .strip_suffix(|c: char| c == '.' || c == ';')
        .unwrap_or(content);

    let rewritten = format!(
        "{}{}{}{}{}{}",
        &body[..prefix_end],
        content,
        terminator,
        gap,
        split.comment,
        ending
    );

    (rewritten != line).then_some(rewritten)
}
