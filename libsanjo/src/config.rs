//! Format configuration.
//!
//! The markers that give a line its meaning are fixed. Indentation width and
//! the list syntax can be chosen per parse through [`FormatConfig`].

use crate::error::{ParseError, Result};

/// Prefix of a class definition line.
pub const CLASS_MARKER: char = ':';
/// Prefix of a key-value line.
pub const KEY_MARKER: char = '.';
/// Separates a key from its value.
pub const ASSIGNMENT_OPERATOR: char = '=';

pub const DEFAULT_INDENTATION_WIDTH: usize = 4;
pub const DEFAULT_LIST_KEY_SUFFIX: &str = "[]";
pub const DEFAULT_LIST_SEPARATOR: &str = ",";

/// Settings that stay fixed for the duration of a parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatConfig {
    indentation_width: usize,
    list_key_suffix: String,
    list_separator: String,
}

impl FormatConfig {
    /// Create a configuration, rejecting values the parser cannot work with.
    pub fn new(
        indentation_width: usize,
        list_key_suffix: impl Into<String>,
        list_separator: impl Into<String>,
    ) -> Result<Self> {
        let list_key_suffix = list_key_suffix.into();
        let list_separator = list_separator.into();
        if indentation_width == 0 {
            return Err(ParseError::InvalidConfig(
                "indentation width must be positive".to_string(),
            ));
        }
        if list_key_suffix.is_empty() {
            return Err(ParseError::InvalidConfig(
                "list key suffix must not be empty".to_string(),
            ));
        }
        if list_separator.is_empty() {
            return Err(ParseError::InvalidConfig(
                "list separator must not be empty".to_string(),
            ));
        }
        Ok(Self {
            indentation_width,
            list_key_suffix,
            list_separator,
        })
    }

    /// Number of spaces per indentation level.
    pub fn indentation_width(&self) -> usize {
        self.indentation_width
    }

    /// Suffix on a key that marks its value as a list.
    pub fn list_key_suffix(&self) -> &str {
        &self.list_key_suffix
    }

    /// Delimiter between list elements.
    pub fn list_separator(&self) -> &str {
        &self.list_separator
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indentation_width: DEFAULT_INDENTATION_WIDTH,
            list_key_suffix: DEFAULT_LIST_KEY_SUFFIX.to_string(),
            list_separator: DEFAULT_LIST_SEPARATOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.indentation_width(), 4);
        assert_eq!(config.list_key_suffix(), "[]");
        assert_eq!(config.list_separator(), ",");
    }

    #[test]
    fn test_custom() {
        let config = FormatConfig::new(2, "*", ";").unwrap();
        assert_eq!(config.indentation_width(), 2);
        assert_eq!(config.list_key_suffix(), "*");
        assert_eq!(config.list_separator(), ";");
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = FormatConfig::new(0, "[]", ",").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid format configuration: indentation width must be positive"
        );
    }

    #[test]
    fn test_empty_markers_rejected() {
        assert!(FormatConfig::new(4, "", ",").is_err());
        assert!(FormatConfig::new(4, "[]", "").is_err());
    }
}
