//! Phase 1: Scanner
//!
//! The scanner looks at one raw line at a time. It counts the leading spaces
//! and decides what kind of line it is:
//! - a class definition (`:name`)
//! - a key-value pair (`.key=value`)
//! - anything else, which is a comment and is dropped

use crate::config::{CLASS_MARKER, KEY_MARKER};

/// What a significant line declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Class,
    KeyValue,
}

/// A single significant line after scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanLine<'a> {
    pub kind: LineKind,
    /// Content after the indent and the marker.
    pub content: &'a str,
    /// Number of leading spaces.
    pub indent: usize,
    /// One-based position in the source, comments included. Only used for logging.
    pub source_line: usize,
}

/// Classify one raw line. Returns `None` for comments and blank lines.
pub fn scan_line(raw: &str, source_line: usize) -> Option<ScanLine<'_>> {
    let indent = count_indent(raw);
    let rest = &raw[indent..];

    let (kind, content) = if let Some(content) = rest.strip_prefix(CLASS_MARKER) {
        (LineKind::Class, content)
    } else if let Some(content) = rest.strip_prefix(KEY_MARKER) {
        (LineKind::KeyValue, content)
    } else {
        return None;
    };

    Some(ScanLine {
        kind,
        content,
        indent,
        source_line,
    })
}

/// Count the number of leading spaces in a line. Tabs are not indentation.
fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}
