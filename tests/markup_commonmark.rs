//! The converter's output must read as the intended structure to a
//! CommonMark parser.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

use hidemark::editor::{EditAction, EditorBuffer};
use hidemark::format::{HeadlineLevel, Style};

fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    node.descendants()
        .filter_map(|n| match &n.data.borrow().value {
            NodeValue::Text(t) => Some(t.clone()),
            _ => None,
        })
        .collect()
}

fn headings(markdown: &str) -> Vec<(u8, String)> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &Options::default());
    root.descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Heading(heading) => Some((heading.level, collect_text(node))),
            _ => None,
        })
        .collect()
}

#[test]
fn test_headlines_become_atx_headings() {
    let mut buf = EditorBuffer::empty();
    buf.apply(EditAction::Headline(HeadlineLevel::H1));
    buf.insert_str("Title\nintro\n");
    buf.apply(EditAction::Headline(HeadlineLevel::H2));
    buf.insert_str("Section\n");
    buf.apply(EditAction::Headline(HeadlineLevel::H3));
    buf.insert_str("Detail");

    assert_eq!(
        headings(&buf.to_markup()),
        vec![
            (1, "Title".to_string()),
            (2, "Section".to_string()),
            (3, "Detail".to_string()),
        ]
    );
}

#[test]
fn test_bold_run_becomes_strong() {
    let mut buf = EditorBuffer::from_text("Say ");
    buf.set_selection(4, 4);
    buf.apply(EditAction::Style(Style::Bold));
    buf.insert_str("loud");
    buf.apply(EditAction::Style(Style::Bold));
    buf.insert_str(" things");

    let markdown = buf.to_markup();
    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &Options::default());
    let strong: Vec<String> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Strong))
        .map(collect_text)
        .collect();
    assert_eq!(strong, vec!["loud".to_string()]);
}

#[test]
fn test_list_block_becomes_bullet_items() {
    let mut buf = EditorBuffer::from_text("Groceries");
    buf.set_selection(9, 9);
    buf.apply(EditAction::ListItem);
    buf.insert_str("milk");
    buf.apply(EditAction::ListItem);
    buf.insert_str("eggs");

    let markdown = buf.to_markup();
    assert_eq!(markdown, "Groceries\n- milk\n- eggs");

    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &Options::default());
    let items: Vec<String> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Item(_)))
        .map(collect_text)
        .collect();
    assert_eq!(items, vec!["milk".to_string(), "eggs".to_string()]);
}
