//! Comment-aware line splitting
//!
//! Every content-mutating rule edits only the `code` half of a line and
//! reassembles `code + comment`, so comment text is carried through verbatim.

pub const COMMENT_MARKER: char = '%';
pub const ESCAPE_CHAR: char = '\\';

/// A line split at its first unescaped comment marker.
///
/// `code + comment` always reproduces the original line. When the line has
/// no comment, `code` keeps the line terminator and `comment` is empty;
/// otherwise the terminator belongs to `comment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub code: &'a str,
    pub comment: &'a str,
}

impl<'a> SplitLine<'a> {
    pub fn new(line: &'a str) -> Self {
        match find_comment_start(line) {
            Some(idx) => Self {
                code: &line[..idx],
                comment: &line[idx..],
            },
            None => Self {
                code: line,
                comment: "",
            },
        }
    }

    /// Split like [`SplitLine::new`], except that a marker directly after a
    /// digit is a percent sign (`10%`) and stays in `code`
    pub fn reading_percent_signs(line: &'a str) -> Self {
        let idx = line
            .char_indices()
            .find(|(idx, ch)| {
                *ch == COMMENT_MARKER
                    && !is_escaped(line, *idx)
                    && !line[..*idx].ends_with(|c: char| c.is_ascii_digit())
            })
            .map(|(idx, _)| idx);

        match idx {
            Some(idx) => Self {
                code: &line[..idx],
                comment: &line[idx..],
            },
            None => Self {
                code: line,
                comment: "",
            },
        }
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    /// Reassemble a line from a rewritten code segment and the untouched comment
    pub fn join(&self, code: &str) -> String {
        let mut line = String::with_capacity(code.len() + self.comment.len());
        line.push_str(code);
        line.push_str(self.comment);
        line
    }
}

/// Byte offset of the first comment marker not escaped by a backslash.
///
/// A marker preceded by an odd run of backslashes is escaped (`\%`); an even
/// run (`\\%`) is a line break followed by a real comment.
pub fn find_comment_start(line: &str) -> Option<usize> {
    line.char_indices()
        .find(|(idx, ch)| *ch == COMMENT_MARKER && !is_escaped(line, *idx))
        .map(|(idx, _)| idx)
}

/// True when the character at `idx` is preceded by an odd number of backslashes
pub fn is_escaped(text: &str, idx: usize) -> bool {
    let run = text.as_bytes()[..idx]
        .iter()
        .rev()
        .take_while(|b| **b == ESCAPE_CHAR as u8)
        .count();
    run % 2 == 1
}

/// True when the first non-whitespace character of the line is a comment marker
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}

/// Split off the line terminator (`\r\n`, `\n`, or nothing)
pub fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Line content without its terminator, used for before/after records
pub fn strip_line_ending(line: &str) -> &str {
    split_line_ending(line).0
}
