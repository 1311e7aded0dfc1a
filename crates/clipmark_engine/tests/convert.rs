use clipmark_engine::convert_html_to_markdown;
use pretty_assertions::assert_eq;

fn convert(html: &str) -> String {
    convert_html_to_markdown(html).expect("conversion should not fail")
}

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(convert(""), "");
    assert_eq!(convert("   \n\t "), "");
}

#[test]
fn heading_paragraph_list_in_order() {
    let md = convert(
        "<h1>Title</h1><p>Some <strong>bold</strong> text.</p><ul><li>one</li><li>two</li></ul>",
    );
    let heading = md.find("# Title").expect("heading");
    let bold = md.find("**bold**").expect("strong");
    let item_one = md.find("- one").expect("first item");
    let item_two = md.find("- two").expect("second item");
    assert!(heading < bold && bold < item_one && item_one < item_two);
}

#[test]
fn heading_levels_map_through() {
    assert_eq!(convert("<h3>Deep</h3>").trim(), "### Deep");
    assert_eq!(convert("<h6>Deepest</h6>").trim(), "###### Deepest");
}

#[test]
fn emphasis_uses_underscore() {
    assert_eq!(convert("<p><em>quiet</em></p>").trim(), "_quiet_");
}

#[test]
fn strikethrough_uses_gfm_tildes() {
    assert_eq!(convert("<p><del>gone</del></p>").trim(), "~~gone~~");
}

#[test]
fn nested_list_switches_bullet() {
    let md = convert("<ul><li>a<ul><li>b</li></ul></li></ul>");
    assert!(md.contains("- a"), "outer bullet missing: {md:?}");
    assert!(md.contains("+ b"), "nested bullet missing: {md:?}");
}

#[test]
fn ordered_list_numbers_items() {
    let md = convert("<ol><li>first</li><li>second</li></ol>");
    assert!(md.contains("1. first"));
    assert!(md.contains("2. second"));
}

#[test]
fn task_list_items_keep_their_state() {
    let md = convert(
        "<ul><li><input type=\"checkbox\" checked>done</li>\
         <li><input type=\"checkbox\">todo</li></ul>",
    );
    assert!(md.contains("- [x] done"), "{md:?}");
    assert!(md.contains("- [ ] todo"), "{md:?}");
}

#[test]
fn links_and_autolinks() {
    assert_eq!(
        convert("<p><a href=\"http://x\">text</a></p>").trim(),
        "[text](http://x)"
    );
    assert_eq!(
        convert("<p><a href=\"http://x\">http://x</a></p>").trim(),
        "<http://x>"
    );
}

#[test]
fn images_carry_alt_text() {
    assert_eq!(
        convert("<p><img src=\"x.png\" alt=\"pic\"></p>").trim(),
        "![pic](x.png)"
    );
}

#[test]
fn inline_code_is_backticked() {
    assert_eq!(convert("<p>run <code>make</code></p>").trim(), "run `make`");
}

#[test]
fn pre_becomes_fenced_code_block() {
    let md = convert("<pre><code class=\"language-rust\">fn main() {}</code></pre>");
    assert_eq!(md.trim(), "```rust\nfn main() {}\n```");
}

#[test]
fn blockquote_is_prefixed() {
    assert_eq!(convert("<blockquote><p>quoted</p></blockquote>").trim(), "> quoted");
}

#[test]
fn hr_becomes_thematic_break() {
    assert_eq!(convert("<p>a</p><hr><p>b</p>").trim(), "a\n\n---\n\nb");
}

#[test]
fn table_becomes_gfm_table() {
    let md = convert(
        "<table><tr><th>name</th><th>age</th></tr>\
         <tr><td>ada</td><td>36</td></tr></table>",
    );
    assert_eq!(md.trim(), "| name | age |\n| --- | --- |\n| ada | 36 |");
}

#[test]
fn admonition_container_becomes_directive() {
    let md = convert("<div class=\"admonition warning\"><p>careful</p></div>");
    assert_eq!(md.trim(), ":::warning\ncareful\n:::");
}

#[test]
fn data_directive_attribute_wins() {
    let md = convert("<section data-directive=\"tip\"><p>hint</p></section>");
    assert_eq!(md.trim(), ":::tip\nhint\n:::");
}

#[test]
fn malformed_html_is_tolerated() {
    let md = convert("<p>unclosed <b>bold");
    assert!(md.contains("**bold**"), "{md:?}");
}

#[test]
fn script_and_style_are_dropped() {
    let md = convert("<p>visible</p><script>var x = 1;</script><style>p{}</style>");
    assert_eq!(md.trim(), "visible");
}

#[test]
fn presentational_wrappers_are_transparent() {
    let md = convert("<div><span>plain</span> <u>underlined</u></div>");
    assert_eq!(md.trim(), "plain underlined");
}

#[test]
fn line_breaks_become_hard_breaks() {
    let md = convert("<p>one<br>two</p>");
    assert_eq!(md.trim(), "one\\\ntwo");
}

#[test]
fn whitespace_runs_collapse() {
    let md = convert("<p>a \n   b</p>");
    assert_eq!(md.trim(), "a b");
}
