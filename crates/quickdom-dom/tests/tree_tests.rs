//! Tests for document tree construction and traversal.

use quickdom_dom::{DocumentTree, NodeId, NodeKind};

#[test]
fn test_new_tree_has_only_root() {
    let tree = DocumentTree::new();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.kind(NodeId::ROOT), Some(NodeKind::Root));
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_append_child_links_both_sides() {
    let mut tree = DocumentTree::new();
    let p = tree.alloc(NodeKind::Paragraph);
    tree.append_child(NodeId::ROOT, p);

    assert_eq!(tree.children(NodeId::ROOT), &[p]);
    assert_eq!(tree.parent(p), Some(NodeId::ROOT));
}

#[test]
fn test_children_preserve_document_order() {
    let mut tree = DocumentTree::new();
    let first = tree.alloc(NodeKind::Heading);
    let second = tree.alloc(NodeKind::Paragraph);
    let third = tree.alloc(NodeKind::Image);
    tree.append_child(NodeId::ROOT, first);
    tree.append_child(NodeId::ROOT, second);
    tree.append_child(NodeId::ROOT, third);

    assert_eq!(tree.children(NodeId::ROOT), &[first, second, third]);
}

#[test]
fn test_attribute_lookup() {
    let mut tree = DocumentTree::new();
    let img = tree.alloc(NodeKind::Image);
    tree.append_child(NodeId::ROOT, img);
    let node = tree.get_mut(img).unwrap();
    let _ = node
        .attributes
        .insert("src".to_string(), "image.jpg".to_string());

    assert_eq!(tree.attribute(img, "src"), Some("image.jpg"));
    assert_eq!(tree.attribute(img, "width"), None);
}

#[test]
fn test_root_children_of_kind_filters() {
    let mut tree = DocumentTree::new();
    let p = tree.alloc(NodeKind::Paragraph);
    let a = tree.alloc(NodeKind::Image);
    let b = tree.alloc(NodeKind::Image);
    tree.append_child(NodeId::ROOT, p);
    tree.append_child(NodeId::ROOT, a);
    tree.append_child(NodeId::ROOT, b);

    let images: Vec<_> = tree.root_children_of_kind(NodeKind::Image).collect();
    assert_eq!(images, vec![a, b]);
}

#[test]
fn test_identically_built_trees_compare_equal() {
    let build = || {
        let mut tree = DocumentTree::new();
        let p = tree.alloc(NodeKind::Paragraph);
        tree.get_mut(p).unwrap().text = "hello".to_string();
        tree.append_child(NodeId::ROOT, p);
        tree
    };
    assert_eq!(build(), build());
}

#[test]
fn test_missing_node_accessors_return_none() {
    let tree = DocumentTree::new();
    let missing = NodeId(42);
    assert_eq!(tree.get(missing), None);
    assert_eq!(tree.kind(missing), None);
    assert_eq!(tree.text(missing), None);
    assert!(tree.children(missing).is_empty());
}
