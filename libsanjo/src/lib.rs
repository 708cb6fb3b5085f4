//! Sanjo parser implementation.
//!
//! Sanjo is a small indentation-based format. A document is a tree of named
//! classes, each holding string values and nested classes:
//!
//! ```text
//! :server
//!     .host=localhost
//!     .ports[]=80,443
//!     :tls
//!         .cert=/etc/cert.pem
//! ```
//!
//! Lines starting with `:` declare a class, lines starting with `.` declare a
//! value, and every other line is a comment.
//!
//! # Parsing Pipeline
//!
//! The parser operates in two phases over a single forward pass:
//!
//! 1. **Scanner**: Counts the indentation of a raw line and classifies it as a
//!    class definition, a key-value pair, or a comment.
//!
//! 2. **Indentation resolver**: Turns indentation levels into parent-child
//!    placement using the most recent class seen at each level.

mod config;
mod error;
mod parser;
mod scanner;
mod source;
mod tree;
mod value;

pub use config::{
    FormatConfig, ASSIGNMENT_OPERATOR, CLASS_MARKER, DEFAULT_INDENTATION_WIDTH,
    DEFAULT_LIST_KEY_SUFFIX, DEFAULT_LIST_SEPARATOR, KEY_MARKER,
};
pub use error::{IndentReason, ParseError, Result};
pub use parser::Parser;
pub use source::{split_lines, FileSource, LineSource, StrSource};
pub use tree::{ClassId, ClassNode, Document};
pub use value::{Data, Value};

/// Name used in error messages when the input has no name of its own.
pub const DEFAULT_SOURCE_NAME: &str = "input";

/// Parse a Sanjo document from a string with the default format.
///
/// # Example
///
/// ```
/// use libsanjo::parse;
///
/// let doc = parse(":Root\n    .name=Alice").unwrap();
/// let root = doc.children(doc.root().id()).next().unwrap();
/// assert_eq!(root.value("name").unwrap().as_str(), Some("Alice"));
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parse_with_name(input, DEFAULT_SOURCE_NAME)
}

/// Parse a Sanjo document from a string with a name for error messages.
pub fn parse_with_name(input: &str, name: &str) -> Result<Document> {
    parse_with_config(input, name, &FormatConfig::default())
}

/// Parse a Sanjo document from a string with a custom format.
pub fn parse_with_config(input: &str, name: &str, config: &FormatConfig) -> Result<Document> {
    Parser::new(config, name).parse_lines(split_lines(input))
}

/// Read all lines from `source` and parse them.
///
/// Read failures are reported before any line is looked at.
pub fn parse_source(source: &dyn LineSource, config: &FormatConfig) -> Result<Document> {
    let source_id = source.identifier();
    let lines = source.read_lines().map_err(|e| ParseError::Io {
        source_id: source_id.clone(),
        source: e,
    })?;
    Parser::new(config, source_id).parse_lines(lines)
}
