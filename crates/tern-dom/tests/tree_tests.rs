//! Tests for the arena document tree: allocation, attachment, traversal.

use tern_dom::{AttrValue, BuildStage, DocTree, ElementData, NodeId, NodeKind};

/// Helper to create a named element node and return its NodeId.
fn alloc_element(tree: &mut DocTree, name: &str) -> NodeId {
    let mut data = ElementData::unnamed();
    data.name = name.to_string();
    data.stage = BuildStage::CollectingBody;
    tree.alloc(NodeKind::Element(data))
}

#[test]
fn test_new_tree_has_document_root() {
    let tree = DocTree::new();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root(), NodeId::ROOT);
    assert!(matches!(
        tree.get(NodeId::ROOT).map(|n| &n.kind),
        Some(NodeKind::Document)
    ));
}

#[test]
fn test_alloc_is_detached() {
    let mut tree = DocTree::new();
    let el = alloc_element(&mut tree, "div");
    assert_eq!(tree.parent(el), None);
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_append_child_sets_relationships() {
    let mut tree = DocTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.alloc(NodeKind::Text("a".to_string()));
    let b = alloc_element(&mut tree, "p");
    tree.append_child(parent, a);
    tree.append_child(parent, b);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.parent(a), Some(parent));
    assert_eq!(tree.parent(b), Some(parent));
}

#[test]
fn test_as_element_and_as_text() {
    let mut tree = DocTree::new();
    let el = alloc_element(&mut tree, "span");
    let text = tree.alloc(NodeKind::Text("hello".to_string()));

    assert_eq!(tree.as_element(el).map(|d| d.name.as_str()), Some("span"));
    assert!(tree.as_element(text).is_none());
    assert_eq!(tree.as_text(text), Some("hello"));
    assert!(tree.as_text(el).is_none());
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = DocTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, p);

    let chain: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(chain, vec![body, html, NodeId::ROOT]);
}

#[test]
fn test_attribute_values_and_flags() {
    let mut data = ElementData::unnamed();
    data.name = "a".to_string();
    let _ = data
        .attributes
        .insert("href".to_string(), AttrValue::Value("http://x".to_string()));
    let _ = data
        .attributes
        .insert("download".to_string(), AttrValue::Flag);

    assert_eq!(data.attr("href"), Some("http://x"));
    assert_eq!(data.attr("download"), None);
    assert_eq!(data.attr("missing"), None);
}

#[test]
fn test_duplicate_attribute_overwrites() {
    let mut data = ElementData::unnamed();
    let _ = data
        .attributes
        .insert("id".to_string(), AttrValue::Value("first".to_string()));
    let _ = data
        .attributes
        .insert("id".to_string(), AttrValue::Value("second".to_string()));
    assert_eq!(data.attr("id"), Some("second"));
}
