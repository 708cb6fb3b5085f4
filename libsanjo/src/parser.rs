//! Phase 2: Indentation resolver
//!
//! The resolver walks the scanned lines once, front to back, and places every
//! class and value in the tree. It keeps one piece of state per indentation
//! level: the class most recently declared at that level (the "working class").
//!
//! Levels are counted from 1 for content at column 0; level 0 belongs to the
//! implicit root class. A class line at level `n` becomes a child of the
//! working class at `n - 1`, and everything nested inside it sits at `n + 1`.
//! A key-value line at level `n` belongs to the working class at `n - 1`.

use tracing::{debug, trace};

use crate::config::{FormatConfig, ASSIGNMENT_OPERATOR};
use crate::error::{IndentReason, ParseContext, Result};
use crate::scanner::{scan_line, LineKind, ScanLine};
use crate::tree::{ClassId, Document};
use crate::value::Value;

/// Single-use parser state for one input.
pub struct Parser<'c> {
    config: &'c FormatConfig,
    ctx: ParseContext,
    doc: Document,
    /// Working class per level, indexed by level. Entries are overwritten when a
    /// new class appears at the same level, never removed.
    working: Vec<ClassId>,
    /// Level expected of the next line; a class may not go deeper than this.
    last_level: usize,
    /// One-based count of class and key-value lines, the current one included.
    /// Comments do not advance it.
    line_number: usize,
}

impl<'c> Parser<'c> {
    /// Create a parser. `source_id` names the input in error messages.
    pub fn new(config: &'c FormatConfig, source_id: impl Into<String>) -> Self {
        Self {
            config,
            ctx: ParseContext::new(source_id),
            doc: Document::new(),
            working: vec![ClassId::ROOT],
            last_level: 1,
            line_number: 1,
        }
    }

    /// Consume every line and return the finished document.
    ///
    /// Error positions count class and key-value lines only, starting at 1;
    /// comment and blank lines are not numbered. The first error aborts the parse.
    pub fn parse_lines<I, S>(mut self, lines: I) -> Result<Document>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, raw) in lines.into_iter().enumerate() {
            self.feed(raw.as_ref(), i + 1)?;
        }
        debug!(
            source = %self.ctx.source_id,
            classes = self.doc.len() - 1,
            "parsed document"
        );
        Ok(self.doc)
    }

    fn feed(&mut self, raw: &str, source_line: usize) -> Result<()> {
        let Some(line) = scan_line(raw, source_line) else {
            trace!(source_line, "skipping comment");
            return Ok(());
        };

        let width = self.config.indentation_width();
        if line.indent % width != 0 {
            return Err(self.ctx.indentation(
                self.line_number,
                IndentReason::NotMultiple {
                    indent: line.indent,
                    width,
                },
            ));
        }
        let level = line.indent / width + 1;
        trace!(line = self.line_number, source_line, level, kind = ?line.kind, "scanned");

        self.last_level = match line.kind {
            LineKind::Class => self.class(level, &line)? + 1,
            LineKind::KeyValue => {
                self.key_value(level, &line)?;
                level
            }
        };
        self.line_number += 1;
        Ok(())
    }

    /// Attach a class definition and make it the working class at `level`.
    fn class(&mut self, level: usize, line: &ScanLine<'_>) -> Result<usize> {
        if level > self.last_level {
            return Err(self
                .ctx
                .indentation(self.line_number, IndentReason::ClassTooDeep));
        }

        // Sibling or dedent, the parent is the working class one level up.
        let parent = self.working_class(level - 1, IndentReason::ClassTooDeep)?;
        let id = self.doc.add_child(parent, line.content);
        let dedent = level < self.last_level;
        debug!(line = line.source_line, level, class = line.content, dedent, "class");

        if level < self.working.len() {
            self.working[level] = id;
        } else {
            debug_assert_eq!(level, self.working.len());
            self.working.push(id);
        }
        Ok(level)
    }

    /// Store a key-value pair on the working class one level up.
    fn key_value(&mut self, level: usize, line: &ScanLine<'_>) -> Result<()> {
        let (key, data) = line
            .content
            .split_once(ASSIGNMENT_OPERATOR)
            .ok_or_else(|| self.ctx.malformed(self.line_number))?;

        let value = match key.strip_suffix(self.config.list_key_suffix()) {
            Some(key) => Value::list(key, data.split(self.config.list_separator())),
            None => Value::scalar(key, data),
        };

        let owner = self.working_class(level - 1, IndentReason::ValueTooDeep)?;
        debug!(line = line.source_line, level, key = value.key(), "value");
        self.doc.put_value(owner, value);
        Ok(())
    }

    fn working_class(&self, level: usize, reason: IndentReason) -> Result<ClassId> {
        self.working
            .get(level)
            .copied()
            .ok_or_else(|| self.ctx.indentation(self.line_number, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn parse(input: &str) -> Result<Document> {
        let config = FormatConfig::default();
        Parser::new(&config, "test").parse_lines(input.lines())
    }

    fn names<'a>(doc: &'a Document, id: ClassId) -> Vec<&'a str> {
        doc.children(id).map(|c| c.name()).collect()
    }

    fn indent_reason(err: ParseError) -> (usize, IndentReason) {
        match err {
            ParseError::Indentation { line, reason, .. } => (line, reason),
            other => panic!("expected indentation error, got {:?}", other),
        }
    }

    #[test]
    fn test_class_with_value() {
        let doc = parse(":Root\n    .name=Alice").unwrap();
        let root = doc.child(ClassId::ROOT, "Root").unwrap();
        assert_eq!(root.value("name").unwrap().as_str(), Some("Alice"));
        assert!(doc.root().values().is_empty());
    }

    #[test]
    fn test_nested_classes() {
        let doc = parse(":A\n    :B\n        .x=1").unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        let b = doc.child(a.id(), "B").unwrap();
        assert_eq!(b.value("x").unwrap().as_str(), Some("1"));
        assert_eq!(doc.depth(b.id()), 2);
    }

    #[test]
    fn test_dedent_goes_to_matching_level() {
        let doc = parse(":A\n    :B\n:C").unwrap();
        assert_eq!(names(&doc, ClassId::ROOT), vec!["A", "C"]);
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        assert_eq!(names(&doc, a.id()), vec!["B"]);
    }

    #[test]
    fn test_dedent_by_two_levels() {
        let doc = parse(":A\n    :B\n        :C\n    :D\n:E").unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        assert_eq!(names(&doc, a.id()), vec!["B", "D"]);
        let b = doc.child(a.id(), "B").unwrap();
        assert_eq!(names(&doc, b.id()), vec!["C"]);
        assert_eq!(names(&doc, ClassId::ROOT), vec!["A", "E"]);
    }

    #[test]
    fn test_siblings_share_parent() {
        let doc = parse(":A\n    :B\n    :C\n    :D").unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap().id();
        for child in doc.children(a) {
            assert_eq!(child.parent(), Some(a));
        }
        assert_eq!(names(&doc, a), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_root_list() {
        let doc = parse(".tags[]=a,b,c").unwrap();
        let tags = doc.root().value("tags").unwrap();
        assert_eq!(tags.as_list().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn test_list_without_separator() {
        let doc = parse(".one[]=solo").unwrap();
        assert_eq!(doc.root().value("one").unwrap().as_list().unwrap(), ["solo"]);
    }

    #[test]
    fn test_list_keeps_empty_fields() {
        let doc = parse(".l[]=a,,b,").unwrap();
        assert_eq!(doc.root().value("l").unwrap().as_list().unwrap(), ["a", "", "b", ""]);
    }

    #[test]
    fn test_scalar_is_raw() {
        let doc = parse(".greeting= hello, world = yes ").unwrap();
        assert_eq!(
            doc.root().value("greeting").unwrap().as_str(),
            Some(" hello, world = yes ")
        );
    }

    #[test]
    fn test_custom_config() {
        let config = FormatConfig::new(2, "*", ";").unwrap();
        let doc = Parser::new(&config, "custom")
            .parse_lines(":A\n  .xs*=1;2\n  .y[]=3".lines())
            .unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        assert_eq!(a.value("xs").unwrap().as_list().unwrap(), ["1", "2"]);
        assert_eq!(a.value("y[]").unwrap().as_str(), Some("3"));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let doc = parse(":A\n    .k=1\n    .other=x\n    .k=2").unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        assert_eq!(a.values().len(), 2);
        assert_eq!(a.value("k").unwrap().as_str(), Some("2"));
        assert_eq!(a.values()[0].key(), "k");
    }

    #[test]
    fn test_value_after_dedent_goes_to_outer_class() {
        let doc = parse(":A\n    :B\n        .x=1\n    .y=2").unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        assert_eq!(a.value("y").unwrap().as_str(), Some("2"));
        assert!(doc.child(a.id(), "B").unwrap().value("y").is_none());
    }

    #[test]
    fn test_value_uses_last_class_seen_at_level() {
        // B is still the working class at level 2 after C dedents to level 1.
        let doc = parse(":A\n    :B\n:C\n        .x=1").unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        let b = doc.child(a.id(), "B").unwrap();
        assert_eq!(b.value("x").unwrap().as_str(), Some("1"));
        assert!(doc.child(ClassId::ROOT, "C").unwrap().values().is_empty());
    }

    #[test]
    fn test_comments_do_not_change_levels() {
        let doc = parse(":A\n            deeply indented comment\n    :B\n# top\n    .x=1").unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        let b = doc.child(a.id(), "B").unwrap();
        assert!(b.value("x").is_none());
        assert_eq!(a.value("x").unwrap().as_str(), Some("1"));
    }

    #[test]
    fn test_not_multiple_of_width() {
        let err = parse(":A\n   .x=1").unwrap_err();
        assert_eq!(
            indent_reason(err),
            (2, IndentReason::NotMultiple { indent: 3, width: 4 })
        );
    }

    #[test]
    fn test_class_cannot_be_indented() {
        let err = parse(":A\n        :B").unwrap_err();
        assert_eq!(indent_reason(err), (2, IndentReason::ClassTooDeep));

        let err = parse("    :A").unwrap_err();
        assert_eq!(indent_reason(err), (1, IndentReason::ClassTooDeep));
    }

    #[test]
    fn test_class_after_value_at_same_level() {
        // After a value at level 2, a class at level 2 is a sibling of that value.
        let doc = parse(":A\n    .x=1\n    :B").unwrap();
        let a = doc.child(ClassId::ROOT, "A").unwrap();
        assert_eq!(names(&doc, a.id()), vec!["B"]);
    }

    #[test]
    fn test_class_after_value_cannot_go_deeper() {
        let err = parse(".x=1\n    :B").unwrap_err();
        assert_eq!(indent_reason(err), (2, IndentReason::ClassTooDeep));
    }

    #[test]
    fn test_value_without_class() {
        let err = parse("        .x=1").unwrap_err();
        assert_eq!(indent_reason(err), (1, IndentReason::ValueTooDeep));
    }

    #[test]
    fn test_line_numbers_skip_comments() {
        let err = parse("# header\n\n:A\n  .x=1").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_line_numbers_skip_interleaved_comments() {
        let err = parse(":A\n# note\n    .x=1\n\n    # note\n    .y\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 3, .. }));
    }

    #[test]
    fn test_missing_assignment() {
        let err = parse(":A\n    .novalue").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_empty_input() {
        let doc = parse("").unwrap();
        assert!(doc.is_empty());
    }
}
