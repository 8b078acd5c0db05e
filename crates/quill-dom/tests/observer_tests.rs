//! Tests for attribute mutation, observer records and the id index.

use quill_dom::{
    Attribute, AttributeList, DomError, DomTree, ElementData, IdIndex, MutationObserverInit,
    MutationRecord, Namespace, NodeId, NodeType,
};

fn element_with(tree: &mut DomTree, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let attrs: AttributeList = attrs.iter().map(|&(n, v)| Attribute::new(n, v)).collect();
    let id = tree.alloc(NodeType::Element(ElementData::html(tag, attrs)));
    tree.append_child(NodeId::ROOT, id).unwrap();
    id
}

#[test]
fn test_set_attribute_records_old_value() {
    let mut tree = DomTree::new();
    let div = element_with(&mut tree, "div", &[("class", "a")]);
    let observer = tree.observe(MutationObserverInit::attributes());

    assert_eq!(tree.set_attribute(div, "class", "b"), Ok(Some("a".to_string())));
    assert_eq!(tree.set_attribute(div, "title", "t"), Ok(None));

    assert_eq!(
        tree.take_records(observer),
        vec![
            MutationRecord::AttributeChanged {
                target: div,
                name: "class".to_string(),
                namespace: None,
                old_value: Some("a".to_string()),
            },
            MutationRecord::AttributeChanged {
                target: div,
                name: "title".to_string(),
                namespace: None,
                old_value: None,
            },
        ]
    );
    assert!(tree.take_records(observer).is_empty());
    assert_eq!(tree.as_element(div).and_then(|e| e.get_attribute("class")), Some("b"));
}

#[test]
fn test_set_prefixed_attribute_resolves_namespace() {
    let mut tree = DomTree::new();
    let svg = element_with(&mut tree, "svg", &[]);
    let observer = tree.observe(MutationObserverInit::attributes());

    let _ = tree.set_attribute(svg, "xlink:href", "#icon").unwrap();

    let attrs = tree.as_element(svg).map(ElementData::attrs).unwrap();
    assert_eq!(attrs.get_ns(Some(Namespace::XLink), "href"), Some("#icon"));
    assert!(matches!(
        tree.take_records(observer).as_slice(),
        [MutationRecord::AttributeChanged { name, namespace: Some(Namespace::XLink), .. }] if name == "href"
    ));
}

#[test]
fn test_remove_attribute() {
    let mut tree = DomTree::new();
    let div = element_with(&mut tree, "div", &[("hidden", "")]);
    let observer = tree.observe(MutationObserverInit::attributes());

    assert_eq!(tree.remove_attribute(div, "hidden"), Ok(Some(String::new())));
    assert_eq!(tree.remove_attribute(div, "hidden"), Ok(None));
    assert_eq!(tree.take_records(observer).len(), 1);
    assert!(tree.as_element(div).unwrap().attrs().is_empty());
}

#[test]
fn test_attribute_filter_and_target() {
    let mut tree = DomTree::new();
    let a = element_with(&mut tree, "div", &[]);
    let b = element_with(&mut tree, "div", &[]);
    let filtered = tree.observe(MutationObserverInit::default().with_attribute_filter(["id"]));
    let targeted = tree.observe(MutationObserverInit {
        target: Some(b),
        ..MutationObserverInit::attributes()
    });

    let _ = tree.set_attribute(a, "class", "x").unwrap();
    let _ = tree.set_attribute(a, "id", "first").unwrap();
    let _ = tree.set_attribute(b, "class", "y").unwrap();

    let ids: Vec<NodeId> = tree.take_records(filtered).iter().map(MutationRecord::target).collect();
    assert_eq!(ids, vec![a]);
    let ids: Vec<NodeId> = tree.take_records(targeted).iter().map(MutationRecord::target).collect();
    assert_eq!(ids, vec![b]);
}

#[test]
fn test_disconnect_stops_records() {
    let mut tree = DomTree::new();
    let div = element_with(&mut tree, "div", &[]);
    let observer = tree.observe(MutationObserverInit::attributes());
    tree.disconnect(observer);

    let _ = tree.set_attribute(div, "class", "x").unwrap();
    assert!(tree.take_records(observer).is_empty());
}

#[test]
fn test_child_list_records() {
    let mut tree = DomTree::new();
    let observer = tree.observe(MutationObserverInit {
        child_list: true,
        ..MutationObserverInit::default()
    });
    let div = element_with(&mut tree, "div", &[]);

    assert_eq!(
        tree.take_records(observer),
        vec![MutationRecord::ChildList {
            target: NodeId::ROOT,
            added: vec![div],
            removed: Vec::new(),
        }]
    );
}

#[test]
fn test_mutating_non_element_is_error() {
    let mut tree = DomTree::new();
    let text = tree.alloc(NodeType::Text("x".to_string()));

    assert_eq!(tree.set_attribute(text, "id", "a"), Err(DomError::NotAnElement(text)));
    assert_eq!(
        tree.remove_attribute(NodeId(42), "id"),
        Err(DomError::UnknownNode(NodeId(42)))
    );
    assert_eq!(tree.set_attribute(NodeId::ROOT, "id", "a"), Err(DomError::NotAnElement(NodeId::ROOT)));
}

#[test]
fn test_id_index_follows_changes() {
    let mut tree = DomTree::new();
    let a = element_with(&mut tree, "div", &[("id", "one")]);
    let b = element_with(&mut tree, "div", &[]);
    let mut index = IdIndex::new(&mut tree);
    assert_eq!(index.get("one"), Some(a));
    assert_eq!(index.len(), 1);

    let _ = tree.set_attribute(b, "id", "two").unwrap();
    let _ = tree.remove_attribute(a, "id").unwrap();
    index.refresh(&mut tree);

    assert_eq!(index.get("one"), None);
    assert_eq!(index.get("two"), Some(b));
    assert_eq!(index.len(), 1);

    index.detach(&mut tree);
}

#[test]
fn test_html_attribute_names_are_lowercased() {
    let mut tree = DomTree::new();
    let div = element_with(&mut tree, "div", &[]);
    let observer = tree.observe(MutationObserverInit::attributes());

    let _ = tree.set_attribute(div, "TiTle", "x").unwrap();
    assert_eq!(tree.as_element(div).unwrap().attrs().get("title"), Some("x"));
    assert_eq!(tree.remove_attribute(div, "TITLE"), Ok(Some("x".to_string())));

    let names: Vec<String> = tree
        .take_records(observer)
        .into_iter()
        .filter_map(|record| match record {
            MutationRecord::AttributeChanged { name, .. } => Some(name),
            MutationRecord::ChildList { .. } => None,
        })
        .collect();
    assert_eq!(names, vec!["title", "title"]);
}

#[test]
fn test_foreign_attribute_names_keep_case() {
    let mut tree = DomTree::new();
    let svg = tree.alloc(NodeType::Element(ElementData::new(
        "svg",
        Namespace::Svg,
        AttributeList::new(),
    )));
    tree.append_child(NodeId::ROOT, svg).unwrap();

    let _ = tree.set_attribute(svg, "viewBox", "0 0 1 1").unwrap();
    let attrs = tree.as_element(svg).unwrap().attrs();
    assert_eq!(attrs.get("viewBox"), Some("0 0 1 1"));
    assert_eq!(attrs.get("viewbox"), None);
}

#[test]
fn test_id_index_follows_id_in_any_case() {
    let mut tree = DomTree::new();
    let div = element_with(&mut tree, "div", &[]);
    let svg = tree.alloc(NodeType::Element(ElementData::new(
        "svg",
        Namespace::Svg,
        AttributeList::new(),
    )));
    tree.append_child(NodeId::ROOT, svg).unwrap();
    let mut index = IdIndex::new(&mut tree);

    let _ = tree.set_attribute(div, "ID", "upper").unwrap();
    let _ = tree.set_attribute(svg, "ID", "foreign").unwrap();
    index.refresh(&mut tree);
    assert_eq!(index.get("upper"), Some(div));
    assert_eq!(index.get("foreign"), Some(svg));

    let _ = tree.set_attribute(div, "Id", "renamed").unwrap();
    let _ = tree.set_attribute(svg, "title", "ignored").unwrap();
    index.refresh(&mut tree);
    assert_eq!(index.get("upper"), None);
    assert_eq!(index.get("renamed"), Some(div));
    assert_eq!(index.len(), 2);

    index.detach(&mut tree);
}
