//! Multi-line region tracking for the per-line pass
//!
//! Per-line fixers have no memory of earlier lines, so the orchestrator tags
//! each line with the block it sits in. Fixers leave verbatim blocks alone and
//! the underscore fixer also skips display math.

use crate::splitter::{is_comment_line, SplitLine};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MATH_BEGIN: Regex = Regex::new(
        r"\\begin\{(?:equation|align|alignat|flalign|gather|multline|eqnarray|displaymath|math)\*?\}|(?:^|[^\\])\\\[|\$\$"
    )
    .unwrap();
    static ref MATH_END: Regex = Regex::new(
        r"\\end\{(?:equation|align|alignat|flalign|gather|multline|eqnarray|displaymath|math)\*?\}|(?:^|[^\\])\\\]|\$\$"
    )
    .unwrap();
    static ref VERBATIM_BEGIN: Regex =
        Regex::new(r"\\begin\{(?:verbatim|Verbatim|lstlisting|minted|comment)\*?\}").unwrap();
    static ref VERBATIM_END: Regex =
        Regex::new(r"\\end\{(?:verbatim|Verbatim|lstlisting|minted|comment)\*?\}").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Text,
    Math,
    Verbatim,
}

/// Walks a document line by line and reports the region of each line.
/// Opening and closing lines belong to the region they delimit.
#[derive(Debug, Default)]
pub struct RegionTracker {
    state: Region,
}

impl RegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, line: &str) -> Region {
        match self.state {
            Region::Verbatim => {
                if VERBATIM_END.is_match(line) {
                    self.state = Region::Text;
                }
                Region::Verbatim
            }
            _ if is_comment_line(line) => self.state,
            Region::Math => {
                if MATH_END.is_match(SplitLine::new(line).code) {
                    self.state = Region::Text;
                }
                Region::Math
            }
            Region::Text => {
                let code = SplitLine::new(line).code;
                if VERBATIM_BEGIN.is_match(code) {
                    if !VERBATIM_END.is_match(line) {
                        self.state = Region::Verbatim;
                    }
                    return Region::Verbatim;
                }
                if let Some(open) = MATH_BEGIN.find(code) {
                    if !MATH_END.is_match(&code[open.end()..]) {
                        self.state = Region::Math;
                    }
                    return Region::Math;
                }
                Region::Text
            }
        }
    }
}
