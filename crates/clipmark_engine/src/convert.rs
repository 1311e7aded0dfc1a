use clip_logging::clip_debug;
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

use crate::document::{trim_inlines, Block, Inline, ListItem};
use crate::serialize::serialize;
use crate::types::ConvertError;

/// Converts an HTML fragment to Markdown text.
///
/// Empty or whitespace-only input yields empty output. Malformed markup is
/// tolerated by fragment parsing; a panic anywhere in the pipeline is
/// caught and surfaced as a [`ConvertError`] so the UI can show a fallback
/// message instead of crashing.
pub fn convert_html_to_markdown(html: &str) -> Result<String, ConvertError> {
    if html.trim().is_empty() {
        return Ok(String::new());
    }
    let blocks = std::panic::catch_unwind(|| html_to_blocks(html))
        .map_err(|payload| ConvertError::Pipeline(panic_message(payload.as_ref())))?;
    clip_debug!(
        "converted {} bytes of html into {} top-level blocks",
        html.len(),
        blocks.len()
    );
    Ok(serialize(&blocks))
}

/// Parses an HTML fragment and transforms it into the document tree.
pub fn html_to_blocks(html: &str) -> Vec<Block> {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();
    let mut collector = BlockCollector::default();
    for child in root.children() {
        collector.visit(child);
    }
    collector.finish()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "conversion panicked".to_string()
    }
}

/// Accumulates blocks while gathering loose inline content into paragraphs,
/// the way browsers split paragraphs at block element boundaries.
#[derive(Default)]
struct BlockCollector {
    blocks: Vec<Block>,
    pending: Vec<Inline>,
}

impl BlockCollector {
    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }

    fn flush(&mut self) {
        let inlines = trim_inlines(std::mem::take(&mut self.pending));
        if !inlines.is_empty() {
            self.blocks.push(Block::Paragraph(inlines));
        }
    }

    fn push_block(&mut self, block: Block) {
        self.flush();
        self.blocks.push(block);
    }

    fn visit(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => push_text(&mut self.pending, text),
            Node::Element(element) => self.visit_element(element.name(), node),
            _ => {}
        }
    }

    fn visit_element(&mut self, name: &str, node: NodeRef<'_, Node>) {
        if let Some(directive) = directive_name(node) {
            let mut inner = BlockCollector::default();
            for child in node.children() {
                inner.visit(child);
            }
            self.push_block(Block::Directive {
                name: directive,
                children: inner.finish(),
            });
            return;
        }

        match name {
            "p" => {
                let inlines = trim_inlines(collect_inlines(node));
                if !inlines.is_empty() {
                    self.push_block(Block::Paragraph(inlines));
                }
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name.as_bytes()[1] - b'0';
                self.push_block(Block::Heading {
                    level,
                    content: trim_inlines(collect_inlines(node)),
                });
            }
            "ul" => {
                let items = collect_list_items(node);
                if !items.is_empty() {
                    self.push_block(Block::List {
                        ordered: false,
                        items,
                    });
                }
            }
            "ol" => {
                let items = collect_list_items(node);
                if !items.is_empty() {
                    self.push_block(Block::List {
                        ordered: true,
                        items,
                    });
                }
            }
            "pre" => self.push_block(code_block_from_pre(node)),
            "blockquote" => {
                let mut inner = BlockCollector::default();
                for child in node.children() {
                    inner.visit(child);
                }
                self.push_block(Block::BlockQuote(inner.finish()));
            }
            "table" => {
                if let Some(table) = parse_table(node) {
                    self.push_block(table);
                }
            }
            "hr" => self.push_block(Block::ThematicBreak),
            "br" => self.pending.push(Inline::LineBreak),
            // Non-content subtrees are dropped entirely.
            "script" | "style" | "head" | "title" | "meta" | "link" | "template" | "noscript"
            | "input" | "button" => {}
            "a" | "em" | "i" | "strong" | "b" | "code" | "del" | "s" | "strike" | "img"
            | "span" | "u" | "sub" | "sup" | "abbr" | "mark" | "small" | "kbd" => {
                collect_inline_node(node, &mut self.pending);
            }
            // Everything else (div, section, article, ...) is a transparent
            // container that still breaks any paragraph in progress.
            _ => {
                self.flush();
                for child in node.children() {
                    self.visit(child);
                }
                self.flush();
            }
        }
    }
}

/// Admonition-style containers map to directives: either an explicit
/// `data-directive` attribute or an `admonition <kind>` class pair, as the
/// editor surface emits them.
fn directive_name(node: NodeRef<'_, Node>) -> Option<String> {
    let element = node.value().as_element()?;
    if let Some(name) = element.attr("data-directive") {
        let name = name.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    let classes = element.attr("class")?;
    let mut parts = classes.split_whitespace();
    if parts.next() == Some("admonition") {
        return Some(parts.next().unwrap_or("note").to_string());
    }
    None
}

fn collect_inlines(node: NodeRef<'_, Node>) -> Vec<Inline> {
    let mut out = Vec::new();
    for child in node.children() {
        collect_inline_node(child, &mut out);
    }
    out
}

fn collect_inline_node(node: NodeRef<'_, Node>, out: &mut Vec<Inline>) {
    match node.value() {
        Node::Text(text) => push_text(out, text),
        Node::Element(element) => match element.name() {
            "em" | "i" => push_container(out, Inline::Emphasis, node),
            "strong" | "b" => push_container(out, Inline::Strong, node),
            "del" | "s" | "strike" => push_container(out, Inline::Strikethrough, node),
            "code" => {
                let code = text_content(node);
                if !code.is_empty() {
                    out.push(Inline::Code(code));
                }
            }
            "a" => {
                let url = element.attr("href").unwrap_or_default().to_string();
                let title = element
                    .attr("title")
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(ToOwned::to_owned);
                let content = trim_inlines(collect_inlines(node));
                out.push(Inline::Link {
                    url,
                    title,
                    content,
                });
            }
            "img" => {
                let url = element.attr("src").unwrap_or_default().to_string();
                let alt = element.attr("alt").unwrap_or_default().to_string();
                out.push(Inline::Image { url, alt });
            }
            "br" => out.push(Inline::LineBreak),
            "script" | "style" | "template" | "noscript" => {}
            // Presentation-only wrappers are transparent.
            _ => {
                for child in node.children() {
                    collect_inline_node(child, out);
                }
            }
        },
        _ => {}
    }
}

fn push_container(
    out: &mut Vec<Inline>,
    wrap: fn(Vec<Inline>) -> Inline,
    node: NodeRef<'_, Node>,
) {
    let inner = trim_inlines(collect_inlines(node));
    if !inner.is_empty() {
        out.push(wrap(inner));
    }
}

/// Collapses whitespace runs to single spaces and merges adjacent text.
fn push_text(out: &mut Vec<Inline>, raw: &str) {
    let mut text = String::with_capacity(raw.len());
    let mut prev_space = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                text.push(' ');
                prev_space = true;
            }
        } else {
            text.push(ch);
            prev_space = false;
        }
    }
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(prev)) = out.last_mut() {
        prev.push_str(&text);
    } else {
        out.push(Inline::Text(text));
    }
}

/// Raw text content of a subtree, whitespace preserved (code blocks).
fn text_content(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        if let Node::Text(text) = descendant.value() {
            out.push_str(text);
        }
    }
    out
}

fn collect_list_items(node: NodeRef<'_, Node>) -> Vec<ListItem> {
    let mut items = Vec::new();
    for child in node.children() {
        let is_li = child
            .value()
            .as_element()
            .is_some_and(|el| el.name() == "li");
        if !is_li {
            continue;
        }
        let checked = task_checkbox_state(child);
        let mut inner = BlockCollector::default();
        for grandchild in child.children() {
            inner.visit(grandchild);
        }
        items.push(ListItem {
            checked,
            blocks: inner.finish(),
        });
    }
    items
}

/// GFM task-list state from a leading `<input type="checkbox">`.
fn task_checkbox_state(li: NodeRef<'_, Node>) -> Option<bool> {
    for descendant in li.descendants() {
        if let Some(element) = descendant.value().as_element() {
            if element.name() == "input"
                && element
                    .attr("type")
                    .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
            {
                return Some(element.attr("checked").is_some());
            }
        }
    }
    None
}

fn code_block_from_pre(pre: NodeRef<'_, Node>) -> Block {
    let mut language = None;
    let mut code_node = None;
    for descendant in pre.descendants() {
        if let Some(element) = descendant.value().as_element() {
            if element.name() == "code" {
                language = element.attr("class").and_then(|classes| {
                    classes.split_whitespace().find_map(|class| {
                        class
                            .strip_prefix("language-")
                            .or_else(|| class.strip_prefix("lang-"))
                            .map(ToOwned::to_owned)
                    })
                });
                code_node = Some(descendant);
                break;
            }
        }
    }
    let code = text_content(code_node.unwrap_or(pre))
        .trim_end_matches('\n')
        .to_string();
    Block::CodeBlock { language, code }
}

fn parse_table(table: NodeRef<'_, Node>) -> Option<Block> {
    let mut header: Vec<Vec<Inline>> = Vec::new();
    let mut rows: Vec<Vec<Vec<Inline>>> = Vec::new();

    for descendant in table.descendants() {
        let is_tr = descendant
            .value()
            .as_element()
            .is_some_and(|el| el.name() == "tr");
        if !is_tr {
            continue;
        }
        let mut cells = Vec::new();
        let mut has_th = false;
        for cell in descendant.children() {
            if let Some(element) = cell.value().as_element() {
                match element.name() {
                    "th" => {
                        has_th = true;
                        cells.push(trim_inlines(collect_inlines(cell)));
                    }
                    "td" => cells.push(trim_inlines(collect_inlines(cell))),
                    _ => {}
                }
            }
        }
        if cells.is_empty() {
            continue;
        }
        if has_th && header.is_empty() {
            header = cells;
        } else {
            rows.push(cells);
        }
    }

    // GFM tables need a header row; promote the first body row if the
    // source had none.
    if header.is_empty() {
        if rows.is_empty() {
            return None;
        }
        header = rows.remove(0);
    }
    Some(Block::Table { header, rows })
}
