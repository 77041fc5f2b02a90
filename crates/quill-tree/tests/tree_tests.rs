//! Tests for parse tree construction and mutation.

use quill_common::{CssVersion, SourceArea, SourceLocation};
use quill_tree::{NodeId, NodeKind, ParseTree};

/// Helper to build `h1 { color: red }` as a tree by hand.
fn style_rule_tree() -> (ParseTree, NodeId, NodeId) {
    let mut tree = ParseTree::new(NodeKind::Root, CssVersion::Css30);
    let rule = tree.append_new(NodeId::ROOT, NodeKind::StyleRule, None, None);
    let selector = tree.append_new(rule, NodeKind::Selector, None, None);
    let _ = tree.append_new(selector, NodeKind::ElementName, Some("h1".into()), None);
    let list = tree.append_new(rule, NodeKind::StyleDeclarationList, None, None);
    let decl = tree.append_new(list, NodeKind::StyleDeclaration, None, None);
    let _ = tree.append_new(decl, NodeKind::Property, Some("color".into()), None);
    (tree, rule, decl)
}

// ========== construction ==========

#[test]
fn test_new_tree_has_entry_node() {
    let tree = ParseTree::new(NodeKind::StyleDeclarationList, CssVersion::Css21);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.entry_kind(), NodeKind::StyleDeclarationList);
    assert_eq!(tree.version(), CssVersion::Css21);
    assert!(tree.children(tree.root()).is_empty());
}

#[test]
fn test_append_links_siblings() {
    let (tree, rule, _) = style_rule_tree();
    let children = tree.children(rule);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.next_sibling(children[0]), Some(children[1]));
    assert_eq!(tree.prev_sibling(children[1]), Some(children[0]));
    assert_eq!(tree.parent(rule), Some(NodeId::ROOT));
}

#[test]
fn test_text_and_kind() {
    let (tree, _, decl) = style_rule_tree();
    let prop = tree.first_child(decl).unwrap();
    assert_eq!(tree.kind(prop), NodeKind::Property);
    assert_eq!(tree.text(prop), "color");
    assert!(!tree.has_text(decl));
    assert_eq!(tree.text(decl), "");
}

#[test]
fn test_ancestors_walk_to_root() {
    let (tree, rule, decl) = style_rule_tree();
    let ancestors: Vec<_> = tree.ancestors(decl).collect();
    assert_eq!(ancestors.len(), 3);
    assert_eq!(ancestors[1], rule);
    assert_eq!(ancestors[2], NodeId::ROOT);
    assert!(tree.is_descendant_of(decl, rule));
    assert!(!tree.is_descendant_of(rule, decl));
}

#[test]
fn test_find_child() {
    let (tree, rule, _) = style_rule_tree();
    let list = tree.find_child(rule, NodeKind::StyleDeclarationList);
    assert_eq!(list, tree.child(rule, 1));
    assert_eq!(tree.find_child(rule, NodeKind::MediaList), None);
}

// ========== mutation ==========

#[test]
fn test_remove_child_relinks_siblings() {
    let mut tree = ParseTree::new(NodeKind::Root, CssVersion::Css30);
    let a = tree.append_new(NodeId::ROOT, NodeKind::StyleRule, None, None);
    let b = tree.append_new(NodeId::ROOT, NodeKind::MediaRule, None, None);
    let c = tree.append_new(NodeId::ROOT, NodeKind::PageRule, None, None);

    tree.remove_child(NodeId::ROOT, b);

    assert_eq!(tree.children(NodeId::ROOT), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
}

#[test]
fn test_truncate_children() {
    let mut tree = ParseTree::new(NodeKind::Root, CssVersion::Css30);
    for _ in 0..4 {
        let _ = tree.append_new(NodeId::ROOT, NodeKind::StyleRule, None, None);
    }
    tree.truncate_children(NodeId::ROOT, 1);
    assert_eq!(tree.child_count(NodeId::ROOT), 1);
    assert_eq!(tree.len(), 5);
}

#[test]
fn test_preceding_siblings() {
    let mut tree = ParseTree::new(NodeKind::Root, CssVersion::Css30);
    let a = tree.append_new(NodeId::ROOT, NodeKind::StyleRule, None, None);
    let b = tree.append_new(NodeId::ROOT, NodeKind::StyleRule, None, None);
    let c = tree.append_new(NodeId::ROOT, NodeKind::StyleRule, None, None);
    let preceding: Vec<_> = tree.preceding_siblings(c).collect();
    assert_eq!(preceding, vec![b, a]);
}

#[test]
fn test_area_roundtrip() {
    let mut tree = ParseTree::new(NodeKind::Root, CssVersion::Css30);
    let area = SourceArea::new(SourceLocation::new(2, 3), SourceLocation::new(2, 9));
    let rule = tree.append_new(NodeId::ROOT, NodeKind::StyleRule, None, Some(area));
    assert_eq!(tree.area(rule), Some(area));
    tree.set_area(rule, None);
    assert_eq!(tree.area(rule), None);
}

// ========== kinds ==========

#[test]
fn test_kind_display() {
    assert_eq!(NodeKind::StyleDeclaration.to_string(), "STYLEDECLARATION");
    assert_eq!(NodeKind::Root.to_string(), "ROOT");
    assert!(NodeKind::Root.is_entry());
    assert!(NodeKind::StyleDeclarationList.is_entry());
    assert!(!NodeKind::StyleRule.is_entry());
    assert!(NodeKind::MediaRule.is_rule());
}

#[test]
fn test_dump_outline() {
    let (tree, rule, _) = style_rule_tree();
    let dump = tree.dump(rule);
    assert!(dump.starts_with("STYLERULE\n  SELECTOR\n    ELEMENTNAME \"h1\"\n"));
}
