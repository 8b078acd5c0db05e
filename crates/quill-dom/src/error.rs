//! Errors for operations that would break the tree's invariants.

use thiserror::Error;

use crate::node::NodeId;

/// A mutation the tree refused.
///
/// Markup errors never end up here. These are programming errors on the
/// caller's side, surfaced instead of silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id does not name a node in this tree.
    #[error("no node with id {0:?}")]
    UnknownNode(NodeId),
    /// The operation needs an element.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    /// [§ 4.2.3](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    /// "throw a HierarchyRequestError DOMException"
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(&'static str),
}
