//! Error types for Sanjo parsing.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for Sanjo parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying the source identifier for error reporting.
#[derive(Clone, Debug)]
pub struct ParseContext {
    pub source_id: String,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
        }
    }

    /// Illegal indentation at a 1-based line.
    pub fn indentation(&self, line: usize, reason: IndentReason) -> ParseError {
        ParseError::Indentation {
            source_id: self.source_id.clone(),
            line,
            reason,
        }
    }

    /// Key-value line without an assignment operator at a 1-based line.
    pub fn malformed(&self, line: usize) -> ParseError {
        ParseError::MalformedLine {
            source_id: self.source_id.clone(),
            line,
        }
    }
}

/// Why a line's indentation was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentReason {
    /// Leading spaces are not a whole number of indentation units.
    NotMultiple { indent: usize, width: usize },
    /// A class definition is indented deeper than the preceding line allows.
    ClassTooDeep,
    /// A key-value line is indented deeper than the preceding line allows.
    ValueTooDeep,
}

impl fmt::Display for IndentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentReason::NotMultiple { indent, width } => {
                write!(f, "{} spaces is not a multiple of {}", indent, width)
            }
            IndentReason::ClassTooDeep => write!(f, "class definition cannot be indented"),
            IndentReason::ValueTooDeep => write!(f, "value has no enclosing class"),
        }
    }
}

/// Error type for Sanjo parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Indentation is not legal at this line.
    #[error("Illegal indentation ({reason}) at line {line} of <{source_id}>")]
    Indentation {
        source_id: String,
        line: usize,
        reason: IndentReason,
    },

    /// Key-value line without an assignment operator.
    #[error("Expected \"=\" after key at line {line} of <{source_id}>")]
    MalformedLine { source_id: String, line: usize },

    /// Format configuration that cannot be used for parsing.
    #[error("Invalid format configuration: {0}")]
    InvalidConfig(String),

    /// The line source could not be read.
    #[error("Cannot read <{source_id}>: {source}")]
    Io {
        source_id: String,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// The 1-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Indentation { line, .. } | ParseError::MalformedLine { line, .. } => {
                Some(*line)
            }
            ParseError::InvalidConfig(_) | ParseError::Io { .. } => None,
        }
    }

    /// Identifier of the source being parsed, if any.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            ParseError::Indentation { source_id, .. }
            | ParseError::MalformedLine { source_id, .. }
            | ParseError::Io { source_id, .. } => Some(source_id),
            ParseError::InvalidConfig(_) => None,
        }
    }
}
