//! Mutation observers.
//!
//! [§ 4.3 Mutation observers](https://dom.spec.whatwg.org/#mutation-observers)
//!
//! Attributes do not know who cares about them. The tree queues a
//! [`MutationRecord`] for every registered observer whose options match, and
//! collaborators (style, identifier indices) drain their queue with
//! [`DomTree::take_records`].

use std::collections::HashMap;

use crate::namespace::Namespace;
use crate::node::NodeId;
use crate::tree::DomTree;

/// Handle returned by [`DomTree::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) usize);

/// [§ 4.3.1 Interface MutationObserver](https://dom.spec.whatwg.org/#dictdef-mutationobserverinit)
#[derive(Debug, Clone, Default)]
pub struct MutationObserverInit {
    /// Record attribute changes.
    pub attributes: bool,
    /// Record children being added or removed.
    pub child_list: bool,
    /// Only record changes to these attribute names.
    pub attribute_filter: Option<Vec<String>>,
    /// Only record changes on this node. `None` observes the whole tree.
    pub target: Option<NodeId>,
}

impl MutationObserverInit {
    /// Observe every attribute change in the tree.
    #[must_use]
    pub const fn attributes() -> Self {
        Self {
            attributes: true,
            child_list: false,
            attribute_filter: None,
            target: None,
        }
    }

    /// Restrict attribute records to the given names.
    #[must_use]
    pub fn with_attribute_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = true;
        self.attribute_filter = Some(names.into_iter().map(Into::into).collect());
        self
    }

    fn accepts(&self, record: &MutationRecord) -> bool {
        if self.target.is_some_and(|t| t != record.target()) {
            return false;
        }
        match record {
            MutationRecord::AttributeChanged { name, .. } => {
                self.attributes
                    && self
                        .attribute_filter
                        .as_ref()
                        .is_none_or(|names| names.iter().any(|n| n == name))
            }
            MutationRecord::ChildList { .. } => self.child_list,
        }
    }
}

/// [§ 4.3.3 Interface MutationRecord](https://dom.spec.whatwg.org/#interface-mutationrecord)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// An attribute was added, changed or removed.
    AttributeChanged {
        /// Element whose attribute changed.
        target: NodeId,
        /// Local name of the attribute.
        name: String,
        /// Namespace of the attribute.
        namespace: Option<Namespace>,
        /// Value before the change, `None` if the attribute was just added.
        old_value: Option<String>,
    },
    /// Children were added to or removed from `target`.
    ChildList {
        /// Parent whose child list changed.
        target: NodeId,
        /// Nodes inserted.
        added: Vec<NodeId>,
        /// Nodes removed.
        removed: Vec<NodeId>,
    },
}

impl MutationRecord {
    /// The node the record is about.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        match self {
            Self::AttributeChanged { target, .. } | Self::ChildList { target, .. } => *target,
        }
    }
}

/// One registration in the tree.
#[derive(Debug, Clone)]
pub(crate) struct Registration {
    pub(crate) options: MutationObserverInit,
    pub(crate) records: Vec<MutationRecord>,
}

impl Registration {
    pub(crate) fn offer(&mut self, record: &MutationRecord) {
        if self.options.accepts(record) {
            self.records.push(record.clone());
        }
    }
}

/// Maps `id` attribute values to elements, kept current through an
/// attribute observer.
///
/// ```
/// use quill_dom::{Attribute, AttributeList, DomTree, ElementData, IdIndex, NodeId, NodeType};
///
/// let mut tree = DomTree::new();
/// let attrs: AttributeList = [Attribute::new("id", "a")].into_iter().collect();
/// let div = tree.alloc(NodeType::Element(ElementData::html("div", attrs)));
/// tree.append_child(NodeId::ROOT, div).unwrap();
///
/// let mut index = IdIndex::new(&mut tree);
/// assert_eq!(index.get("a"), Some(div));
///
/// tree.set_attribute(div, "id", "b").unwrap();
/// index.refresh(&mut tree);
/// assert_eq!(index.get("a"), None);
/// assert_eq!(index.get("b"), Some(div));
/// ```
#[derive(Debug)]
pub struct IdIndex {
    observer: ObserverId,
    by_id: HashMap<String, Vec<NodeId>>,
}

impl IdIndex {
    /// Build the index from the current tree and start observing it.
    pub fn new(tree: &mut DomTree) -> Self {
        // Unfiltered: an id attribute matches `id` in any ASCII case.
        let observer = tree.observe(MutationObserverInit::attributes());
        let mut by_id: HashMap<String, Vec<NodeId>> = HashMap::new();
        for node in tree.descendants(NodeId::ROOT) {
            if let Some(id) = tree.as_element(node).and_then(|e| e.id()) {
                by_id.entry(id.to_string()).or_default().push(node);
            }
        }
        Self { observer, by_id }
    }

    /// First element (in tree order at build time) with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).and_then(|nodes| nodes.first().copied())
    }

    /// Number of distinct ids indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no element carries an id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Apply queued attribute records.
    pub fn refresh(&mut self, tree: &mut DomTree) {
        for record in tree.take_records(self.observer) {
            let MutationRecord::AttributeChanged {
                target,
                name,
                namespace,
                old_value,
            } = record
            else {
                continue;
            };
            if namespace.is_some() || !name.eq_ignore_ascii_case("id") {
                continue;
            }
            if let Some(old) = old_value
                && let Some(nodes) = self.by_id.get_mut(&old)
            {
                nodes.retain(|&n| n != target);
                if nodes.is_empty() {
                    let _ = self.by_id.remove(&old);
                }
            }
            if let Some(new) = tree.as_element(target).and_then(|e| e.id()) {
                let nodes = self.by_id.entry(new.to_string()).or_default();
                if !nodes.contains(&target) {
                    nodes.push(target);
                }
            }
        }
    }

    /// Stop observing the tree.
    pub fn detach(self, tree: &mut DomTree) {
        tree.disconnect(self.observer);
    }
}
