//! Tests for tree mutation: append, insert, remove and reparenting.

use quill_dom::{AttributeList, DomError, DomTree, ElementData, NodeId, NodeType};

/// Allocate a detached HTML element.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::html(tag, AttributeList::new())))
}

/// A `div` under the document with children `a`, `b`, `c`.
fn three_children(tree: &mut DomTree) -> (NodeId, [NodeId; 3]) {
    let parent = alloc_element(tree, "div");
    tree.append_child(NodeId::ROOT, parent).unwrap();
    let kids = [
        alloc_element(tree, "a"),
        alloc_element(tree, "b"),
        alloc_element(tree, "c"),
    ];
    for kid in kids {
        tree.append_child(parent, kid).unwrap();
    }
    (parent, kids)
}

// ========== append_child ==========

#[test]
fn test_append_links_siblings() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(c));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.prev_sibling(a), None);
}

#[test]
fn test_append_detaches_from_old_parent() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);
    let other = alloc_element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, other).unwrap();

    tree.append_child(other, b).unwrap();

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.children(other), &[b]);
    assert_eq!(tree.parent(b), Some(other));
    assert_eq!(tree.prev_sibling(b), None);
}

#[test]
fn test_reappend_moves_to_end() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);

    tree.append_child(parent, a).unwrap();

    assert_eq!(tree.children(parent), &[b, c, a]);
    assert_eq!(tree.next_sibling(c), Some(a));
    assert_eq!(tree.next_sibling(a), None);
}

#[test]
fn test_append_ancestor_under_descendant_is_error() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    let span = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, div).unwrap();
    tree.append_child(div, span).unwrap();

    assert!(matches!(
        tree.append_child(span, div),
        Err(DomError::HierarchyRequest(_))
    ));
    assert!(matches!(
        tree.append_child(div, div),
        Err(DomError::HierarchyRequest(_))
    ));

    // Nothing moved.
    assert_eq!(tree.children(NodeId::ROOT), &[div]);
    assert_eq!(tree.parent(div), Some(NodeId::ROOT));
    assert_eq!(tree.parent(span), Some(div));
    assert_eq!(
        tree.ancestors(span).collect::<Vec<_>>(),
        vec![div, NodeId::ROOT]
    );
}

#[test]
fn test_append_unknown_node_is_error() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");

    assert_eq!(
        tree.append_child(div, NodeId(999)),
        Err(DomError::UnknownNode(NodeId(999)))
    );
    assert_eq!(
        tree.append_child(NodeId(999), div),
        Err(DomError::UnknownNode(NodeId(999)))
    );
    assert_eq!(tree.parent(div), None);
}

#[test]
fn test_append_document_or_under_text_is_error() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    let text = tree.alloc(NodeType::Text("t".to_string()));
    tree.append_child(NodeId::ROOT, div).unwrap();
    tree.append_child(div, text).unwrap();

    assert!(matches!(
        tree.append_child(div, NodeId::ROOT),
        Err(DomError::HierarchyRequest(_))
    ));
    let other = alloc_element(&mut tree, "b");
    assert!(matches!(
        tree.append_child(text, other),
        Err(DomError::HierarchyRequest(_))
    ));
    assert_eq!(tree.parent(other), None);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_middle() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);

    assert_eq!(tree.remove_child(parent, b), Ok(b));

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_child_first_and_last() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);

    let _ = tree.remove_child(parent, a).unwrap();
    let _ = tree.remove_child(parent, c).unwrap();

    assert_eq!(tree.children(parent), &[b]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_child_wrong_parent_is_error() {
    let mut tree = DomTree::new();
    let (parent, [a, ..]) = three_children(&mut tree);

    assert!(matches!(
        tree.remove_child(NodeId::ROOT, a),
        Err(DomError::HierarchyRequest(_))
    ));
    assert_eq!(tree.parent(a), Some(parent));
    assert_eq!(
        tree.remove_child(parent, NodeId(999)),
        Err(DomError::UnknownNode(NodeId(999)))
    );
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);
    let new_child = alloc_element(&mut tree, "x");

    tree.insert_before(parent, new_child, a).unwrap();

    assert_eq!(tree.children(parent), &[new_child, a, b, c]);
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.next_sibling(new_child), Some(a));
    assert_eq!(tree.prev_sibling(a), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);
    let new_child = alloc_element(&mut tree, "x");

    tree.insert_before(parent, new_child, c).unwrap();

    assert_eq!(tree.children(parent), &[a, b, new_child, c]);
    assert_eq!(tree.next_sibling(b), Some(new_child));
    assert_eq!(tree.prev_sibling(c), Some(new_child));
}

#[test]
fn test_insert_before_moves_existing_sibling() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);

    tree.insert_before(parent, c, a).unwrap();

    assert_eq!(tree.children(parent), &[c, a, b]);
    assert_eq!(tree.next_sibling(b), None);
    assert_eq!(tree.prev_sibling(a), Some(c));
}

#[test]
fn test_insert_before_foreign_reference_appends() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);
    let stray = alloc_element(&mut tree, "stray");
    let new_child = alloc_element(&mut tree, "x");

    tree.insert_before(parent, new_child, stray).unwrap();

    assert_eq!(tree.children(parent), &[a, b, c, new_child]);
}

#[test]
fn test_insert_ancestor_before_its_descendant_is_error() {
    let mut tree = DomTree::new();
    let (parent, [a, b, _]) = three_children(&mut tree);
    let inner = alloc_element(&mut tree, "i");
    tree.append_child(a, inner).unwrap();

    assert!(matches!(
        tree.insert_before(inner, parent, b),
        Err(DomError::HierarchyRequest(_))
    ));
    assert_eq!(
        tree.insert_before(parent, inner, NodeId(999)),
        Err(DomError::UnknownNode(NodeId(999)))
    );
    assert_eq!(tree.parent(parent), Some(NodeId::ROOT));
    assert_eq!(tree.parent(inner), Some(a));
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let (from, [a, b, c]) = three_children(&mut tree);
    let to = alloc_element(&mut tree, "span");
    let existing = alloc_element(&mut tree, "x");
    tree.append_child(to, existing).unwrap();

    tree.move_children(from, to).unwrap();

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing, a, b, c]);
    assert_eq!(tree.next_sibling(existing), Some(a));
    assert_eq!(tree.prev_sibling(a), Some(existing));
    assert!([a, b, c].iter().all(|&n| tree.parent(n) == Some(to)));
}

#[test]
fn test_move_children_empty_source() {
    let mut tree = DomTree::new();
    let from = alloc_element(&mut tree, "div");
    let to = alloc_element(&mut tree, "span");

    tree.move_children(from, to).unwrap();

    assert!(tree.children(to).is_empty());
}

#[test]
fn test_move_children_into_descendant_is_error() {
    let mut tree = DomTree::new();
    let (parent, [a, ..]) = three_children(&mut tree);

    assert!(matches!(
        tree.move_children(parent, a),
        Err(DomError::HierarchyRequest(_))
    ));
    assert_eq!(tree.children(parent).len(), 3);
}

// ========== traversal ==========

#[test]
fn test_descendants_in_tree_order() {
    let mut tree = DomTree::new();
    let (parent, [a, b, c]) = three_children(&mut tree);
    let inner = alloc_element(&mut tree, "i");
    tree.append_child(a, inner).unwrap();

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![parent, a, inner, b, c]);
    assert!(tree.is_descendant_of(inner, parent));
    assert!(!tree.is_descendant_of(parent, inner));
    assert_eq!(
        tree.ancestors(inner).collect::<Vec<_>>(),
        vec![a, parent, NodeId::ROOT]
    );
}

#[test]
fn test_text_content_concatenates_text() {
    let mut tree = DomTree::new();
    let (parent, [a, _, c]) = three_children(&mut tree);
    let t1 = tree.alloc(NodeType::Text("one ".to_string()));
    let comment = tree.alloc(NodeType::Comment("skip".to_string()));
    let t2 = tree.alloc(NodeType::Text("two".to_string()));
    tree.append_child(a, t1).unwrap();
    tree.append_child(a, comment).unwrap();
    tree.append_child(c, t2).unwrap();

    assert_eq!(tree.text_content(parent), "one two");
    assert_eq!(tree.text_content(comment), "skip");
}
