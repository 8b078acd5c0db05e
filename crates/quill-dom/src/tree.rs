//! The arena that owns every node of a document.

use std::borrow::Cow;

use crate::attribute::Attribute;
use crate::error::DomError;
use crate::namespace::{Namespace, QualifiedName};
use crate::node::{DocumentTypeData, ElementData, Node, NodeId, NodeType, QuirksMode};
use crate::observer::{MutationObserverInit, MutationRecord, ObserverId, Registration};

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// Nodes live in a contiguous vector and refer to each other by [`NodeId`].
/// Nodes are never freed; a removed node stays allocated but detached.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
    quirks_mode: QuirksMode,
    observers: Vec<Option<Registration>>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
            quirks_mode: QuirksMode::NoQuirks,
            observers: Vec::new(),
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    ///
    /// Structural fields edited through this reference bypass the sibling
    /// bookkeeping; prefer the tree operations.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of allocated nodes, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the Document node exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(node_type));
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// A child that already has a parent is removed from it first.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for an out-of-range id, and
    /// [`DomError::HierarchyRequest`] if `parent` cannot have children or
    /// the insertion would put `child` inside itself.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.ensure_pre_insertion_validity(parent, child)?;
        let _ = self.unlink(child);
        self.push_child(parent, child);
        Ok(())
    }

    /// [§ 4.2.3 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// Insert `child` into `parent` immediately before `reference`. When
    /// `reference` is not a child of `parent`, `child` is appended.
    ///
    /// # Errors
    ///
    /// The same as [`append_child`](Self::append_child), plus
    /// [`DomError::UnknownNode`] for an out-of-range `reference`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.check(reference)?;
        self.ensure_pre_insertion_validity(parent, child)?;
        if child == reference {
            return Ok(());
        }
        let _ = self.unlink(child);

        let Some(index) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
        else {
            self.push_child(parent, child);
            return Ok(());
        };

        let prev = index
            .checked_sub(1)
            .map(|i| self.nodes[parent.0].children[i]);
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].prev_sibling = prev;
        self.nodes[child.0].next_sibling = Some(reference);
        self.nodes[reference.0].prev_sibling = Some(child);
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = Some(child);
        }
        self.notify_child_list(parent, vec![child], Vec::new());
        Ok(())
    }

    /// [§ 4.2.3 Ensure pre-insertion validity](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    ///
    /// "If parent is not a Document, DocumentFragment, or Element node, then
    /// throw a HierarchyRequestError DOMException."
    ///
    /// "If node is a host-including inclusive ancestor of parent, then throw
    /// a HierarchyRequestError DOMException."
    fn ensure_pre_insertion_validity(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if !matches!(
            self.nodes[parent.0].node_type,
            NodeType::Document | NodeType::Element(_)
        ) {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        if child == NodeId::ROOT {
            return Err(DomError::HierarchyRequest("the document cannot be inserted"));
        }
        if parent == child || self.is_descendant_of(parent, child) {
            return Err(DomError::HierarchyRequest("node would be inserted inside itself"));
        }
        Ok(())
    }

    /// Attach a detached `child` as the last child of `parent`.
    fn push_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
        self.notify_child_list(parent, vec![child], Vec::new());
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detach `child` from `parent`. The node stays in the arena and can be
    /// inserted again.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] if either id is out of range, and
    /// [`DomError::HierarchyRequest`] if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        self.check(parent)?;
        self.check(child)?;
        if self.nodes[child.0].parent != Some(parent) {
            return Err(DomError::HierarchyRequest("node is not a child of the parent"));
        }
        let _ = self.unlink(child);
        Ok(child)
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    ///
    /// The adoption agency algorithm uses this when it reparents the
    /// children of the furthest block.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for an out-of-range id, and
    /// [`DomError::HierarchyRequest`] if `to` is `from` or lies inside it.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) -> Result<(), DomError> {
        self.check(from)?;
        self.check(to)?;
        if from == to || self.is_descendant_of(to, from) {
            return Err(DomError::HierarchyRequest("cannot move children into themselves"));
        }
        let moved = std::mem::take(&mut self.nodes[from.0].children);
        if moved.is_empty() {
            return Ok(());
        }
        let mut prev = self.nodes[to.0].children.last().copied();
        for &child in &moved {
            let node = &mut self.nodes[child.0];
            node.parent = Some(to);
            node.prev_sibling = prev;
            node.next_sibling = None;
            if let Some(p) = prev {
                self.nodes[p.0].next_sibling = Some(child);
            }
            prev = Some(child);
        }
        self.nodes[to.0].children.extend_from_slice(&moved);
        self.notify_child_list(from, Vec::new(), moved.clone());
        self.notify_child_list(to, moved, Vec::new());
        Ok(())
    }

    /// Take `child` out of its parent's child list and fix the sibling
    /// links around it. Returns the former parent.
    fn unlink(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.nodes[child.0].parent.take()?;
        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        if let Some(p) = prev {
            self.nodes[p.0].next_sibling = next;
        }
        if let Some(n) = next {
            self.nodes[n.0].prev_sibling = prev;
        }
        self.nodes[parent.0].children.retain(|&c| c != child);
        self.notify_child_list(parent, Vec::new(), vec![child]);
        Some(parent)
    }

    fn check(&self, id: NodeId) -> Result<(), DomError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::UnknownNode(id))
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over the descendants of a node in tree order, excluding the
    /// node itself.
    ///
    /// [§ 4.2.6](https://dom.spec.whatwg.org/#concept-tree-order)
    /// "Tree order is preorder, depth-first traversal of a tree."
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.as_element(id).is_some())
    }

    /// [§ 3.1.3 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    ///
    /// "The head element of a document is the first head element that is a
    /// child of the html element, if there is one, or null otherwise."
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .copied()
            .find(|&id| self.as_element(id).is_some_and(|e| e.is_html("head")))
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html).iter().copied().find(|&id| {
            self.as_element(id)
                .is_some_and(|e| e.is_html("body") || e.is_html("frameset"))
        })
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-doctype)
    ///
    /// "The doctype getter steps are to return the child of this that is a
    /// doctype; otherwise null."
    #[must_use]
    pub fn doctype(&self) -> Option<&DocumentTypeData> {
        self.children(NodeId::ROOT)
            .iter()
            .find_map(|&id| match &self.get(id)?.node_type {
                NodeType::DocumentType(data) => Some(data),
                _ => None,
            })
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Concatenation of the data of all Text descendants in tree order. For a
    /// Text or Comment node, its own data.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(data) | NodeType::Comment(data)) => data.clone(),
            Some(_) => self
                .descendants(id)
                .filter_map(|d| self.as_text(d))
                .collect(),
            None => String::new(),
        }
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#concept-document-mode)
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// Set the document's mode. The parser does this while handling the
    /// DOCTYPE.
    pub const fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// Set `name` to `value` on an element, adding the attribute if it is
    /// missing. On HTML elements the name is ASCII-lowercased first. A
    /// reserved prefix in `name` (`xlink:`, `xml:`, `xmlns:`) is resolved to
    /// its namespace. Observers receive an
    /// [`MutationRecord::AttributeChanged`] record.
    ///
    /// Returns the previous value.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] or [`DomError::NotAnElement`].
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>, DomError> {
        let value = value.into();
        let element = self.element_mut(node)?;
        let name = attribute_name_for(element, name);
        let (old_value, local_name, namespace) = match element.attrs_mut().get_mut(&name) {
            Some(attr) => {
                let old = attr.replace_value(value);
                (Some(old), attr.local_name().to_string(), attr.namespace())
            }
            None => {
                let qualified = QualifiedName::resolve(&name);
                let local_name = qualified.local_name.clone();
                let namespace = qualified.namespace;
                let _ = element
                    .attrs_mut()
                    .push(Attribute::with_name(qualified, value));
                (None, local_name, namespace)
            }
        };
        self.notify(&MutationRecord::AttributeChanged {
            target: node,
            name: local_name,
            namespace,
            old_value: old_value.clone(),
        });
        Ok(old_value)
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-removeattribute)
    ///
    /// Remove the attribute with the given qualified name, lowercased on HTML
    /// elements. Returns its value,
    /// or `None` (and no record) if the element did not have it.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] or [`DomError::NotAnElement`].
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<Option<String>, DomError> {
        let element = self.element_mut(node)?;
        let name = attribute_name_for(element, name);
        let Some(removed) = element.attrs_mut().remove(&name) else {
            return Ok(None);
        };
        let old_value = removed.value().to_string();
        self.notify(&MutationRecord::AttributeChanged {
            target: node,
            name: removed.local_name().to_string(),
            namespace: removed.namespace(),
            old_value: Some(old_value.clone()),
        });
        Ok(Some(old_value))
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut ElementData, DomError> {
        match self.nodes.get_mut(node.0) {
            None => Err(DomError::UnknownNode(node)),
            Some(Node {
                node_type: NodeType::Element(data),
                ..
            }) => Ok(data),
            Some(_) => Err(DomError::NotAnElement(node)),
        }
    }

    /// [§ 4.3.2](https://dom.spec.whatwg.org/#dom-mutationobserver-observe)
    ///
    /// Register an observer. Records queue up until [`Self::take_records`].
    pub fn observe(&mut self, options: MutationObserverInit) -> ObserverId {
        self.observers.push(Some(Registration {
            options,
            records: Vec::new(),
        }));
        ObserverId(self.observers.len() - 1)
    }

    /// [§ 4.3.2](https://dom.spec.whatwg.org/#dom-mutationobserver-takerecords)
    ///
    /// Drain the records queued for `observer`. A disconnected observer
    /// has none.
    pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.observers
            .get_mut(observer.0)
            .and_then(Option::as_mut)
            .map(|reg| std::mem::take(&mut reg.records))
            .unwrap_or_default()
    }

    /// [§ 4.3.2](https://dom.spec.whatwg.org/#dom-mutationobserver-disconnect)
    ///
    /// Stop delivering records to `observer` and drop its queue.
    pub fn disconnect(&mut self, observer: ObserverId) {
        if let Some(slot) = self.observers.get_mut(observer.0) {
            *slot = None;
        }
    }

    fn notify(&mut self, record: &MutationRecord) {
        for registration in self.observers.iter_mut().flatten() {
            registration.offer(record);
        }
    }

    fn notify_child_list(&mut self, target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) {
        let wanted = self
            .observers
            .iter()
            .flatten()
            .any(|reg| reg.options.child_list);
        if wanted {
            self.notify(&MutationRecord::ChildList {
                target,
                added,
                removed,
            });
        }
    }
}

/// [§ 4.9](https://dom.spec.whatwg.org/#concept-element-attributes-get-by-name)
///
/// "If element is in the HTML namespace and its node document is an HTML
/// document, then set qualifiedName to qualifiedName in ASCII lowercase."
fn attribute_name_for<'a>(element: &ElementData, name: &'a str) -> Cow<'a, str> {
    if element.namespace == Namespace::Html && name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
#[derive(Debug)]
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
#[derive(Debug)]
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
