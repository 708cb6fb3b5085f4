//! TOML transcoding: render a Sanjo document as TOML text.
//!
//! Mapping from Sanjo to TOML:
//!   - scalar value          -> TOML string
//!   - list value            -> TOML array of strings
//!   - class                 -> TOML table
//!   - repeated class names  -> TOML array of tables
//!
//! Lossy edges:
//!   - Classes without values or children still produce an (empty) table header.

use libsanjo::{ClassId, Document};
use toml_edit::DocumentMut;

use super::{nest, Node};

/// Encode a document as a TOML string.
pub fn encode(doc: &Document) -> Result<String, String> {
    let mut out = DocumentMut::new();
    for (key, node) in nest(doc, ClassId::ROOT)? {
        out[key] = node_to_toml(&node)?;
    }
    Ok(out.to_string())
}

fn string(s: &str) -> toml_edit::Value {
    toml_edit::Value::String(toml_edit::Formatted::new(s.to_string()))
}

fn table(entries: &[(&str, Node<'_>)]) -> Result<toml_edit::Table, String> {
    let mut table = toml_edit::Table::new();
    for (k, v) in entries {
        table.insert(k, node_to_toml(v)?);
    }
    Ok(table)
}

fn node_to_toml(node: &Node<'_>) -> Result<toml_edit::Item, String> {
    match node {
        Node::Str(s) => Ok(toml_edit::Item::Value(string(s))),
        Node::List(items) => {
            let mut arr = toml_edit::Array::new();
            for item in items.iter() {
                arr.push(string(item));
            }
            Ok(toml_edit::Item::Value(toml_edit::Value::Array(arr)))
        }
        Node::Table(entries) => Ok(toml_edit::Item::Table(table(entries)?)),
        Node::Tables(tables) => {
            let mut arr = toml_edit::ArrayOfTables::new();
            for t in tables {
                match t {
                    Node::Table(entries) => arr.push(table(entries)?),
                    _ => return Err("Internal error: expected table".to_string()),
                }
            }
            Ok(toml_edit::Item::ArrayOfTables(arr))
        }
    }
}
