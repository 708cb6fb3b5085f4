//! The class tree produced by a parse.
//!
//! All classes of one document live in a single arena owned by [`Document`].
//! A class refers to its parent and children by [`ClassId`], so ownership runs
//! one way only: the document owns every node.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::value::Value;

/// Handle of a class inside its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl ClassId {
    /// The implicit default class that owns all top-level content.
    pub const ROOT: ClassId = ClassId(0);
}

/// A named class with its values and child classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNode {
    id: ClassId,
    name: String,
    parent: Option<ClassId>,
    children: Vec<ClassId>,
    values: Vec<Value>,
}

impl ClassNode {
    fn new(id: ClassId, name: String, parent: Option<ClassId>) -> Self {
        Self {
            id,
            name,
            parent,
            children: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Class name without the class marker. The root is named `""`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` for the root only.
    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// Child handles in source order.
    pub fn child_ids(&self) -> &[ClassId] {
        &self.children
    }

    /// Values in the order their keys first appeared.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.key() == key)
    }
}

/// A parsed document: the root class and everything below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<ClassNode>,
}

impl Document {
    /// A document holding only the empty root class.
    pub fn new() -> Self {
        Self {
            nodes: vec![ClassNode::new(ClassId::ROOT, String::new(), None)],
        }
    }

    pub fn root(&self) -> &ClassNode {
        &self.nodes[ClassId::ROOT.0]
    }

    /// Look up a class by handle.
    ///
    /// Panics if `id` came from another document.
    pub fn node(&self, id: ClassId) -> &ClassNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: ClassId) -> Option<&ClassNode> {
        self.node(id).parent.map(|p| self.node(p))
    }

    pub fn children(&self, id: ClassId) -> impl Iterator<Item = &ClassNode> + '_ {
        self.node(id).children.iter().map(move |&c| self.node(c))
    }

    /// First child of `id` with the given name.
    pub fn child(&self, id: ClassId, name: &str) -> Option<&ClassNode> {
        self.children(id).find(|c| c.name == name)
    }

    /// Number of ancestors; the root has depth 0.
    pub fn depth(&self, id: ClassId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            depth += 1;
            current = self.node(p).parent;
        }
        depth
    }

    /// Number of classes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the input declared no classes and no top-level values.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.root().values.is_empty()
    }

    /// Append a new class under `parent` and return its handle.
    pub fn add_child(&mut self, parent: ClassId, name: impl Into<String>) -> ClassId {
        let id = ClassId(self.nodes.len());
        self.nodes.push(ClassNode::new(id, name.into(), Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Store a value on a class. A value with the same key is replaced in place.
    pub fn put_value(&mut self, id: ClassId, value: Value) {
        let values = &mut self.nodes[id.0].values;
        match values.iter_mut().find(|v| v.key() == value.key()) {
            Some(slot) => *slot = value,
            None => values.push(value),
        }
    }

    fn serializable(&self, id: ClassId) -> SerializeClass<'_> {
        SerializeClass { doc: self, id }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

struct SerializeClass<'a> {
    doc: &'a Document,
    id: ClassId,
}

struct SerializeValues<'a>(&'a [Value]);

impl Serialize for SerializeValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for value in self.0 {
            map.serialize_entry(value.key(), value)?;
        }
        map.end()
    }
}

struct SerializeChildren<'a> {
    doc: &'a Document,
    ids: &'a [ClassId],
}

impl Serialize for SerializeChildren<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids.iter().map(|&id| self.doc.serializable(id)))
    }
}

impl Serialize for SerializeClass<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.doc.node(self.id);
        let mut s = serializer.serialize_struct("Class", 3)?;
        s.serialize_field("name", node.name())?;
        s.serialize_field("values", &SerializeValues(&node.values))?;
        s.serialize_field(
            "children",
            &SerializeChildren {
                doc: self.doc,
                ids: &node.children,
            },
        )?;
        s.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serializable(ClassId::ROOT).serialize(serializer)
    }
}
