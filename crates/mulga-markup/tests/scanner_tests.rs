//! Integration tests for the markup scanner and tree builder.

use mulga_markup::{ParseIssue, Scanner, render_tree};
use mulga_tree::{MarkupTree, NodeId};

/// Helper to scan markup and return the finished tree.
fn parse(markup: &str) -> MarkupTree {
    Scanner::new(markup.to_string()).run()
}

/// Helper to scan markup and return the tree plus recorded issues.
fn parse_with_issues(markup: &str) -> (MarkupTree, Vec<ParseIssue>) {
    Scanner::new(markup.to_string()).run_with_issues()
}

/// Helper to find the first element with a tag name, depth-first.
fn find_element(tree: &MarkupTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag == tag
    {
        return Some(from);
    }
    for &child in tree.children(from) {
        if let Some(found) = find_element(tree, child, tag) {
            return Some(found);
        }
    }
    None
}

/// Helper to read an element's text.
fn text_of(tree: &MarkupTree, id: NodeId) -> Option<String> {
    tree.as_element(id).and_then(|data| data.text.clone())
}

#[test]
fn test_single_element() {
    let tree = parse("<map></map>");
    let map = tree.document_element().expect("no document element");
    assert_eq!(tree.as_element(map).unwrap().tag, "map");
    assert!(tree.children(map).is_empty());
}

#[test]
fn test_empty_input_yields_document_only() {
    let (tree, issues) = parse_with_issues("");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.document_element(), None);
    assert!(issues.is_empty());

    let (tree, issues) = parse_with_issues(" \n\t");
    assert_eq!(tree.document_element(), None);
    assert!(issues.is_empty());
}

#[test]
fn test_nested_elements() {
    let tree = parse("<map><layer><data></data></layer></map>");
    let map = find_element(&tree, NodeId::ROOT, "map").unwrap();
    let layer = find_element(&tree, map, "layer").unwrap();
    let data = find_element(&tree, layer, "data").unwrap();

    assert_eq!(tree.parent(layer), Some(map));
    assert_eq!(tree.parent(data), Some(layer));
}

#[test]
fn test_node_count_matches_tag_count() {
    // One node per opening or self-closing tag, plus the document node.
    let tree = parse("<map><leaf/><a></a></map>");
    assert_eq!(tree.len(), 4);
}

#[test]
fn test_attributes_kept_in_order() {
    let tree = parse(r#"<item a="1" b="2"></item>"#);
    let item = tree.document_element().unwrap();
    let data = tree.as_element(item).unwrap();

    assert_eq!(data.attributes.len(), 2);
    assert_eq!(data.attributes[0].key, "a");
    assert_eq!(data.attributes[0].value, "1");
    assert_eq!(data.attributes[1].key, "b");
    assert_eq!(data.attributes[1].value, "2");
}

#[test]
fn test_quoted_attribute_value_keeps_spaces() {
    let tree = parse(r#"<item name="a b c"></item>"#);
    let item = tree.document_element().unwrap();
    assert_eq!(
        tree.as_element(item).unwrap().attribute("name"),
        Some("a b c")
    );
}

#[test]
fn test_text_attaches_to_open_element() {
    let tree = parse("<a>hello</a>");
    let a = tree.document_element().unwrap();
    assert_eq!(text_of(&tree, a).as_deref(), Some("hello"));
}

#[test]
fn test_whitespace_only_text_is_dropped() {
    let tree = parse("<a> \n\t </a>");
    let a = tree.document_element().unwrap();
    assert_eq!(text_of(&tree, a), None);
}

#[test]
fn test_later_text_overwrites_earlier_text() {
    let (tree, issues) = parse_with_issues("<a>first<b></b>second</a>");
    let a = tree.document_element().unwrap();

    assert_eq!(text_of(&tree, a).as_deref(), Some("second"));
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("overwriting"));
}

#[test]
fn test_self_closing_does_not_take_the_cursor() {
    let tree = parse("<map><leaf/><item></item></map>");
    let map = tree.document_element().unwrap();
    let leaf = find_element(&tree, NodeId::ROOT, "leaf").unwrap();
    let item = find_element(&tree, NodeId::ROOT, "item").unwrap();

    // Both attach to map; item is a sibling of leaf, not its child.
    assert_eq!(tree.parent(leaf), Some(map));
    assert_eq!(tree.parent(item), Some(map));
    assert_eq!(tree.next_sibling(leaf), Some(item));
}

#[test]
fn test_self_closing_name_has_no_slash() {
    let tree = parse("<br/>");
    let br = tree.document_element().unwrap();
    assert_eq!(tree.as_element(br).unwrap().tag, "br");
}

#[test]
fn test_self_closing_with_attributes() {
    let tree = parse(r#"<image source="tiles.png" width="64"/>"#);
    let image = tree.document_element().unwrap();
    let data = tree.as_element(image).unwrap();

    assert_eq!(data.tag, "image");
    assert_eq!(data.attribute("source"), Some("tiles.png"));
    assert_eq!(data.attribute("width"), Some("64"));
}

#[test]
fn test_multiple_top_level_elements() {
    let tree = parse("<a></a><b></b>");
    let children = tree.children(NodeId::ROOT);

    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_element(children[0]).unwrap().tag, "a");
    assert_eq!(tree.as_element(children[1]).unwrap().tag, "b");
    assert_eq!(tree.document_element(), Some(children[0]));
}

#[test]
fn test_mismatched_close_pops_anyway() {
    let (tree, issues) = parse_with_issues("<a><b></b></wrong><c></c>");

    // The tree keeps its positional shape: a holds b, c is top level.
    let a = find_element(&tree, NodeId::ROOT, "a").unwrap();
    let b = find_element(&tree, NodeId::ROOT, "b").unwrap();
    let c = find_element(&tree, NodeId::ROOT, "c").unwrap();
    assert_eq!(tree.parent(b), Some(a));
    assert_eq!(tree.parent(c), Some(NodeId::ROOT));

    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("</wrong>"));
    assert!(issues[0].message.contains("<a>"));
}

#[test]
fn test_close_with_nothing_open() {
    let (tree, issues) = parse_with_issues("</x><a></a>");

    assert_eq!(tree.document_element().map(|id| id.0), Some(1));
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("nothing open"));
    assert_eq!(issues[0].offset, 4);
}

#[test]
fn test_empty_tag_is_skipped() {
    let (tree, issues) = parse_with_issues("<><a></a>");

    let a = tree.document_element().unwrap();
    assert_eq!(tree.as_element(a).unwrap().tag, "a");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("empty tag"));
}

#[test]
fn test_stray_open_restarts_the_tag() {
    let (tree, issues) = parse_with_issues("<ma<map></map>");

    let map = tree.document_element().unwrap();
    assert_eq!(tree.as_element(map).unwrap().tag, "map");
    assert_eq!(tree.len(), 2);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("stray '<'"));
}

#[test]
fn test_stray_close_outside_a_tag_is_text() {
    let tree = parse("<a>1 > 2</a>");
    let a = tree.document_element().unwrap();
    assert_eq!(text_of(&tree, a).as_deref(), Some("1 > 2"));
}

#[test]
fn test_unterminated_tag_is_discarded() {
    let (tree, issues) = parse_with_issues("<a></a><oops");

    assert_eq!(tree.len(), 2);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("ended inside a tag"));
}

#[test]
fn test_trailing_text_is_discarded() {
    let (tree, issues) = parse_with_issues("<a></a>tail");
    let a = tree.document_element().unwrap();

    assert_eq!(text_of(&tree, a), None);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("after the last tag"));

    // A blank tail is normal inter-tag spacing.
    let (_, issues) = parse_with_issues("<a></a>\n");
    assert!(issues.is_empty());
}

#[test]
fn test_orphan_text_is_discarded() {
    let (tree, issues) = parse_with_issues("orphan<a></a>");

    assert_eq!(tree.len(), 2);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("outside of any element"));
}

#[test]
fn test_text_budget_truncates() {
    let scanner = Scanner::new("<a>hello!</a>".to_string()).with_text_capacity(4);
    let (tree, issues) = scanner.run_with_issues();
    let a = tree.document_element().unwrap();

    assert_eq!(text_of(&tree, a).as_deref(), Some("hell"));
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("budget"));
}

#[test]
fn test_attribute_without_value_is_dropped() {
    let (tree, issues) = parse_with_issues("<a flag></a>");
    let a = tree.document_element().unwrap();

    assert!(tree.as_element(a).unwrap().attributes.is_empty());
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("'flag' has no value"));
}

#[test]
fn test_unquoted_attribute_value_is_dropped() {
    let (tree, issues) = parse_with_issues("<a x=5></a>");
    let a = tree.document_element().unwrap();

    assert!(tree.as_element(a).unwrap().attributes.is_empty());
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("no quoted value"));
}

#[test]
fn test_empty_quoted_value_is_dropped() {
    let (tree, issues) = parse_with_issues(r#"<a x=""></a>"#);
    let a = tree.document_element().unwrap();

    assert!(tree.as_element(a).unwrap().attributes.is_empty());
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_prolog_is_scanned_as_an_ordinary_tag() {
    let (tree, issues) = parse_with_issues(r#"<?xml version="1.0"?><map></map>"#);

    // "?xml" opens like any element and never closes, so map nests under it.
    let prolog = tree.document_element().unwrap();
    let data = tree.as_element(prolog).unwrap();
    assert_eq!(data.tag, "?xml");
    assert_eq!(data.attribute("version"), Some("1.0"));

    let map = find_element(&tree, prolog, "map").unwrap();
    assert_eq!(tree.parent(map), Some(prolog));
    assert!(issues.is_empty());
}

#[test]
fn test_balanced_document_records_no_issues() {
    let (_, issues) =
        parse_with_issues(r#"<map width="4"><layer>1,2,3</layer><leaf/></map>"#);
    assert!(issues.is_empty());
}

#[test]
fn test_render_tree_outline() {
    let tree = parse(r#"<map width="4"><layer>1,2,3</layer><leaf/></map>"#);
    let expected = "0 - map\n    :width = 4\n--1 - layer\n    \"\"\" 1,2,3 \"\"\"\n--1 - leaf\n";
    assert_eq!(render_tree(&tree), expected);
}

#[test]
fn test_render_tree_depth_markers() {
    let tree = parse("<a><b><c></c></b></a>");
    let rendered = render_tree(&tree);
    assert_eq!(rendered, "0 - a\n--1 - b\n----2 - c\n");
}

#[test]
fn test_render_empty_tree() {
    let tree = parse("");
    assert_eq!(render_tree(&tree), "");
}
