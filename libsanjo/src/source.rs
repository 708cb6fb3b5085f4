//! Line sources: where the parser gets its input from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Produces the ordered lines of one input.
pub trait LineSource {
    /// Name used in error messages, such as an absolute file path.
    fn identifier(&self) -> String;

    /// Read every line of the input, without line terminators.
    fn read_lines(&self) -> io::Result<Vec<String>>;
}

/// Split text into lines. A `\r` before each `\n` is dropped, and a final
/// newline does not produce an extra empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
}

/// Input held in memory.
#[derive(Clone, Debug)]
pub struct StrSource<'a> {
    name: String,
    text: &'a str,
}

impl<'a> StrSource<'a> {
    pub fn new(name: impl Into<String>, text: &'a str) -> Self {
        Self {
            name: name.into(),
            text,
        }
    }
}

impl LineSource for StrSource<'_> {
    fn identifier(&self) -> String {
        self.name.clone()
    }

    fn read_lines(&self) -> io::Result<Vec<String>> {
        Ok(split_lines(self.text).map(String::from).collect())
    }
}

/// Input read from a UTF-8 file.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    /// The canonical absolute path, or the path as given when it cannot be resolved.
    fn identifier(&self) -> String {
        fs::canonicalize(&self.path)
            .unwrap_or_else(|_| self.path.clone())
            .display()
            .to_string()
    }

    fn read_lines(&self) -> io::Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)?;
        Ok(split_lines(&text).map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_source_lines() {
        let source = StrSource::new("mem", ":A\r\n    .x=1\n\n");
        assert_eq!(source.identifier(), "mem");
        assert_eq!(source.read_lines().unwrap(), vec![":A", "    .x=1", ""]);
    }

    #[test]
    fn test_missing_file() {
        let source = FileSource::new("does/not/exist.sanjo");
        assert_eq!(source.identifier(), "does/not/exist.sanjo");
        assert!(source.read_lines().is_err());
    }

    #[test]
    fn test_file_identifier_is_absolute() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let source = FileSource::new(&manifest);
        assert!(Path::new(&source.identifier()).is_absolute());
        assert!(!source.read_lines().unwrap().is_empty());
    }
}
