//! Transcoders from a parsed Sanjo document to other formats.
//!
//! JSON and CBOR keep the document's own shape (name, values, children).
//! YAML and TOML use a nested view that reads naturally in those formats:
//! a class becomes a mapping of its values followed by its child classes,
//! keyed by class name. Sibling classes sharing a name become a sequence.

pub mod cbor;
pub mod toml;
pub mod yaml;

use libsanjo::{ClassId, Data, Document};

/// A class flattened into named entries.
#[derive(Debug, PartialEq)]
pub enum Node<'a> {
    Str(&'a str),
    List(&'a [String]),
    Table(Vec<(&'a str, Node<'a>)>),
    /// Sibling classes with the same name, in source order.
    Tables(Vec<Node<'a>>),
}

/// Build the nested view of one class.
///
/// Fails when a child class has the same name as a value of its parent.
pub fn nest(doc: &Document, id: ClassId) -> Result<Vec<(&str, Node<'_>)>, String> {
    let node = doc.node(id);
    let mut entries: Vec<(&str, Node<'_>)> = node
        .values()
        .iter()
        .map(|v| {
            let data = match v.data() {
                Data::Scalar(s) => Node::Str(s),
                Data::List(items) => Node::List(items),
            };
            (v.key(), data)
        })
        .collect();
    let value_count = entries.len();

    for child in doc.children(id) {
        let name = child.name();
        let table = Node::Table(nest(doc, child.id())?);
        match entries.iter().position(|(k, _)| *k == name) {
            Some(i) if i < value_count => {
                return Err(format!(
                    "class \"{}\" has the same name as a value of its parent",
                    name
                ));
            }
            Some(i) => {
                let slot = &mut entries[i].1;
                if let Node::Tables(tables) = slot {
                    tables.push(table);
                } else {
                    let first = std::mem::replace(slot, Node::Tables(Vec::new()));
                    *slot = Node::Tables(vec![first, table]);
                }
            }
            None => entries.push((name, table)),
        }
    }

    Ok(entries)
}
