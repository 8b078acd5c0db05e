//! Node types stored in the arena.

use std::collections::HashSet;

use strum_macros::Display;

use crate::attribute::{Attribute, AttributeList};
use crate::namespace::Namespace;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// Parent links are stored as `NodeId`s too, so a child never holds a strong
/// reference to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The Document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its kind-specific data.
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    pub(crate) const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// The kinds of node the parser produces.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    DocumentType(DocumentTypeData),
}

/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
///
/// "Elements have an associated namespace, namespace prefix, local name ..."
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub local_name: String,
    /// Namespace prefix. The HTML parser never sets one for elements, but
    /// the field is kept for trees built by hand.
    pub prefix: Option<String>,
    /// Namespace of the element.
    pub namespace: Namespace,
    attrs: AttributeList,
}

impl ElementData {
    /// An element in the given namespace.
    #[must_use]
    pub fn new(local_name: impl Into<String>, namespace: Namespace, attrs: AttributeList) -> Self {
        Self {
            local_name: local_name.into(),
            prefix: None,
            namespace,
            attrs,
        }
    }

    /// An HTML element.
    #[must_use]
    pub fn html(local_name: impl Into<String>, attrs: AttributeList) -> Self {
        Self::new(local_name, Namespace::Html, attrs)
    }

    /// The element's attributes, in insertion order.
    #[must_use]
    pub const fn attrs(&self) -> &AttributeList {
        &self.attrs
    }

    pub(crate) const fn attrs_mut(&mut self) -> &mut AttributeList {
        &mut self.attrs
    }

    /// Shorthand for `attrs().get(name)`.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Whether this is the HTML element `name`.
    #[must_use]
    pub fn is_html(&self, name: &str) -> bool {
        self.namespace == Namespace::Html && self.local_name == name
    }

    /// Qualified name, `prefix:local` when prefixed.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.iter().find(|a| a.is_id()).map(Attribute::value)
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the
    /// element belongs to."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.attrs
            .get("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }
}

/// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
///
/// "Doctypes have an associated name, public ID, and system ID."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTypeData {
    /// Doctype name, usually `html`.
    pub name: String,
    /// Public identifier, empty when missing.
    pub public_id: String,
    /// System identifier, empty when missing.
    pub system_id: String,
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
///
/// "Each document has an associated ... mode ("no-quirks", "quirks", or
/// "limited-quirks")."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum QuirksMode {
    /// Standards mode.
    #[default]
    NoQuirks,
    /// Legacy rendering mode.
    Quirks,
    /// Almost-standards mode.
    LimitedQuirks,
}
