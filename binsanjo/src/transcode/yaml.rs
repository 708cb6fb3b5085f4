//! YAML transcoding: render a Sanjo document as YAML text.
//!
//! Mapping from Sanjo to YAML:
//!   - scalar value          -> YAML string
//!   - list value            -> YAML sequence of strings
//!   - class                 -> YAML mapping (values first, then child classes)
//!   - repeated class names  -> YAML sequence of mappings
//!
//! Every scalar stays a string: `.port=8080` becomes `port: '8080'`.

use libsanjo::{ClassId, Document};

use super::{nest, Node};

/// Encode a document as a YAML string.
pub fn encode(doc: &Document) -> Result<String, String> {
    let root = node_to_yaml(&Node::Table(nest(doc, ClassId::ROOT)?));
    serde_yaml::to_string(&root).map_err(|e| format!("YAML encode error: {}", e))
}

fn node_to_yaml(node: &Node<'_>) -> serde_yaml::Value {
    match node {
        Node::Str(s) => serde_yaml::Value::String(s.to_string()),
        Node::List(items) => serde_yaml::Value::Sequence(
            items
                .iter()
                .map(|s| serde_yaml::Value::String(s.clone()))
                .collect(),
        ),
        Node::Table(entries) => {
            let mut map = serde_yaml::Mapping::new();
            for (k, v) in entries {
                map.insert(serde_yaml::Value::String(k.to_string()), node_to_yaml(v));
            }
            serde_yaml::Value::Mapping(map)
        }
        Node::Tables(tables) => serde_yaml::Value::Sequence(tables.iter().map(node_to_yaml).collect()),
    }
}
