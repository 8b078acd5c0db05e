//! DOM tree implementation for the Quill HTML parser.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.
//!
//! Element attributes can only be changed through [`DomTree::set_attribute`]
//! and [`DomTree::remove_attribute`], which publish [`MutationRecord`]s to
//! any registered observers. Nothing in an attribute points back at the
//! tree.

mod attribute;
mod error;
mod namespace;
mod node;
mod observer;
pub mod serialize;
mod tree;

pub use attribute::{Attribute, AttributeList};
pub use error::DomError;
pub use namespace::{Namespace, QualifiedName, adjust_foreign_attribute, resolve_prefix};
pub use node::{DocumentTypeData, ElementData, Node, NodeId, NodeType, QuirksMode};
pub use observer::{IdIndex, MutationObserverInit, MutationRecord, ObserverId};
pub use tree::{AncestorIterator, DescendantIterator, DomTree};
