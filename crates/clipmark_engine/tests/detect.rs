use clipmark_engine::{
    convert_html_to_markdown, is_markdown_text, parse_markdown, serialize, Block, Inline,
};
use pretty_assertions::assert_eq;

#[test]
fn too_short_or_empty_is_not_markdown() {
    assert!(!is_markdown_text(""));
    assert!(!is_markdown_text("ab"));
    assert!(!is_markdown_text("  a b  "));
}

#[test]
fn plain_prose_is_not_markdown() {
    assert!(!is_markdown_text("just plain prose."));
    assert!(!is_markdown_text("Two sentences here. Nothing fancy at all."));
}

#[test]
fn structural_blocks_are_markdown() {
    assert!(is_markdown_text("# Heading"));
    assert!(is_markdown_text("- item one\n- item two"));
    assert!(is_markdown_text("1. one\n2. two"));
    assert!(is_markdown_text("> quoted wisdom"));
    assert!(is_markdown_text("```\ncode\n```"));
    assert!(is_markdown_text("| a | b |\n| --- | --- |\n| 1 | 2 |"));
    assert!(is_markdown_text(":::note\nan admonition\n:::"));
}

#[test]
fn inline_formatting_is_markdown() {
    assert!(is_markdown_text("a [link](http://x)"));
    assert!(is_markdown_text("**bold** statement"));
    assert!(is_markdown_text("some `code` here"));
}

#[test]
fn character_level_lookalikes_that_do_not_parse_are_rejected() {
    // An unclosed bracket parses as plain text, not a link.
    assert!(!is_markdown_text("see [reference 12"));
}

#[test]
fn detector_never_panics_on_noise() {
    for input in ["][*_", ":::", "***", "|||", "```", "\\\\\\"] {
        let _ = is_markdown_text(input);
    }
}

#[test]
fn directive_fences_parse_into_directive_blocks() {
    let blocks = parse_markdown(":::warning\ndanger ahead\n:::");
    assert_eq!(blocks.len(), 1);
    match &blocks[0] {
        Block::Directive { name, children } => {
            assert_eq!(name, "warning");
            assert_eq!(children.len(), 1);
        }
        other => panic!("expected directive, got {other:?}"),
    }
}

#[test]
fn directive_fences_inside_code_blocks_are_ignored() {
    let blocks = parse_markdown("```\n:::note\nnot a directive\n:::\n```");
    assert_eq!(blocks.len(), 1);
    assert!(matches!(blocks[0], Block::CodeBlock { .. }));
}

#[test]
fn unclosed_directive_is_plain_content() {
    let blocks = parse_markdown(":::note\nno closing fence");
    assert!(!blocks.iter().any(|b| matches!(b, Block::Directive { .. })));
}

#[test]
fn tight_list_item_inlines_form_a_paragraph() {
    // Tight list items emit their inline events without a paragraph tag;
    // the parser must still gather them into one.
    let blocks = parse_markdown("- **bold** item");
    let items = match &blocks[0] {
        Block::List { items, .. } => items,
        other => panic!("expected list, got {other:?}"),
    };
    assert_eq!(items.len(), 1);
    match &items[0].blocks[0] {
        Block::Paragraph(inlines) => {
            assert!(inlines.iter().any(|i| matches!(i, Inline::Strong(_))));
            assert!(inlines
                .iter()
                .any(|i| matches!(i, Inline::Text(text) if text.contains("item"))));
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn serialization_round_trips_structurally() {
    let source = "# Title\n\nSome **bold** text.\n\n- one\n- two\n";
    let first = parse_markdown(source);
    let reserialized = serialize(&first);
    let second = parse_markdown(&reserialized);
    assert_eq!(first, second);
}

#[test]
fn directive_round_trips_structurally() {
    let source = ":::tip\nUse _italics_ sparingly.\n:::";
    let first = parse_markdown(source);
    let second = parse_markdown(&serialize(&first));
    assert_eq!(first, second);
}

#[test]
fn converted_html_is_detected_as_markdown() {
    let md = convert_html_to_markdown(
        "<h1>Title</h1><p>Some <strong>bold</strong> text.</p><ul><li>one</li><li>two</li></ul>",
    )
    .expect("conversion");
    assert!(is_markdown_text(&md));

    // Re-serializing the re-parsed tree keeps the classification stable.
    let reserialized = serialize(&parse_markdown(&md));
    assert!(is_markdown_text(&reserialized));
}
