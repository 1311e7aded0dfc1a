//! Markdown front-end: parses text into the shared document tree and
//! classifies whether text is already Markdown.
//!
//! The same extension set the serializer targets is used here, so the
//! detector and the converter cannot drift apart: anything classified as
//! Markdown is exactly what the pipeline would have produced structure for.

use clip_logging::clip_trace;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::document::{trim_inlines, Block, Inline, ListItem};

/// Heuristic "is this already Markdown" classifier.
///
/// Returns `true` when the parsed tree contains at least one non-paragraph
/// block, or a paragraph with inline formatting. Plain prose stays `false`,
/// as does anything too short to carry structural signal. Never panics or
/// errors; parser trouble classifies as "not Markdown".
pub fn is_markdown_text(text: &str) -> bool {
    let significant = text.chars().filter(|c| !c.is_whitespace()).count();
    if significant < 3 {
        return false;
    }
    let structured = std::panic::catch_unwind(|| {
        parse_markdown(text).iter().any(Block::is_structural)
    })
    .unwrap_or(false);
    clip_trace!(
        "detector classified {} chars as markdown={}",
        text.len(),
        structured
    );
    structured
}

/// Parses Markdown text into the document tree, including `:::name`
/// directive fences.
pub fn parse_markdown(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut in_code_fence = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_code_fence = !in_code_fence;
        }
        if !in_code_fence {
            if let Some(name) = directive_open(trimmed) {
                if let Some(close) = find_directive_close(&lines, i + 1) {
                    flush_buffer(&mut buffer, &mut blocks);
                    let inner = lines[i + 1..close].join("\n");
                    blocks.push(Block::Directive {
                        name: name.to_string(),
                        children: parse_markdown(&inner),
                    });
                    i = close + 1;
                    continue;
                }
            }
        }
        buffer.push(line);
        i += 1;
    }
    flush_buffer(&mut buffer, &mut blocks);
    blocks
}

fn directive_open(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix(":::")
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Finds the matching bare `:::` for a directive opened just before
/// `start`, tracking nested directives and skipping code fences.
fn find_directive_close(lines: &[&str], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_code_fence = false;
    for (index, line) in lines.iter().enumerate().skip(start) {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_code_fence = !in_code_fence;
            continue;
        }
        if in_code_fence {
            continue;
        }
        if trimmed == ":::" {
            if depth == 0 {
                return Some(index);
            }
            depth -= 1;
        } else if directive_open(trimmed).is_some() {
            depth += 1;
        }
    }
    None
}

fn flush_buffer(buffer: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    let source = buffer.join("\n");
    buffer.clear();
    if source.trim().is_empty() {
        return;
    }
    let mut events = Parser::new_ext(&source, extension_options());
    let parsed = parse_block_seq(&mut events, None);
    blocks.extend(parsed.blocks);
}

/// The extension set shared with the serializer's output style.
fn extension_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

struct SeqResult {
    blocks: Vec<Block>,
    /// Task-list marker seen at this level, if any (list items only).
    checked: Option<bool>,
}

fn parse_block_seq<'a, I>(events: &mut I, until: Option<TagEnd>) -> SeqResult
where
    I: Iterator<Item = Event<'a>>,
{
    let mut blocks = Vec::new();
    let mut pending: Vec<Inline> = Vec::new();
    let mut checked = None;

    while let Some(event) = events.next() {
        match event {
            Event::End(end) if Some(end) == until => break,
            Event::Start(tag) => {
                let end = tag.to_end();
                match tag {
                    Tag::Paragraph => {
                        flush_pending(&mut pending, &mut blocks);
                        let inlines = trim_inlines(parse_inline_seq(events, end));
                        if !inlines.is_empty() {
                            blocks.push(Block::Paragraph(inlines));
                        }
                    }
                    Tag::Heading { level, .. } => {
                        flush_pending(&mut pending, &mut blocks);
                        blocks.push(Block::Heading {
                            level: heading_level(level),
                            content: trim_inlines(parse_inline_seq(events, end)),
                        });
                    }
                    Tag::List(start) => {
                        flush_pending(&mut pending, &mut blocks);
                        blocks.push(parse_list(events, end, start.is_some()));
                    }
                    Tag::CodeBlock(kind) => {
                        flush_pending(&mut pending, &mut blocks);
                        blocks.push(parse_code_block(events, end, kind));
                    }
                    Tag::BlockQuote(_) => {
                        flush_pending(&mut pending, &mut blocks);
                        let inner = parse_block_seq(events, Some(end));
                        blocks.push(Block::BlockQuote(inner.blocks));
                    }
                    Tag::Table(_) => {
                        flush_pending(&mut pending, &mut blocks);
                        blocks.push(parse_table(events, end));
                    }
                    Tag::HtmlBlock => {
                        flush_pending(&mut pending, &mut blocks);
                        let mut raw = String::new();
                        while let Some(inner) = events.next() {
                            match inner {
                                Event::Html(text) | Event::Text(text) => raw.push_str(&text),
                                Event::End(e) if e == end => break,
                                _ => {}
                            }
                        }
                        let raw = raw.trim().to_string();
                        if !raw.is_empty() {
                            blocks.push(Block::Paragraph(vec![Inline::Text(raw)]));
                        }
                    }
                    tag @ (Tag::Emphasis
                    | Tag::Strong
                    | Tag::Strikethrough
                    | Tag::Link { .. }
                    | Tag::Image { .. }) => {
                        // Inline content emitted directly at block level
                        // (tight list items).
                        if let Some(inline) = inline_from_start(tag, events) {
                            pending.push(inline);
                        }
                    }
                    _ => {
                        // Footnote definitions and other extension blocks:
                        // splice their content through.
                        let inner = parse_block_seq(events, Some(end));
                        blocks.extend(inner.blocks);
                    }
                }
            }
            Event::Rule => {
                flush_pending(&mut pending, &mut blocks);
                blocks.push(Block::ThematicBreak);
            }
            Event::TaskListMarker(state) => checked = Some(state),
            Event::Text(text) => push_parsed_text(&mut pending, &text),
            Event::Code(code) => pending.push(Inline::Code(code.to_string())),
            Event::SoftBreak => push_parsed_text(&mut pending, " "),
            Event::HardBreak => pending.push(Inline::LineBreak),
            Event::Html(text) | Event::InlineHtml(text) => push_parsed_text(&mut pending, &text),
            _ => {}
        }
    }

    flush_pending(&mut pending, &mut blocks);
    SeqResult { blocks, checked }
}

fn parse_list<'a, I>(events: &mut I, end: TagEnd, ordered: bool) -> Block
where
    I: Iterator<Item = Event<'a>>,
{
    let mut items = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(tag @ Tag::Item) => {
                let item_end = tag.to_end();
                let inner = parse_block_seq(events, Some(item_end));
                items.push(ListItem {
                    checked: inner.checked,
                    blocks: inner.blocks,
                });
            }
            Event::End(e) if e == end => break,
            _ => {}
        }
    }
    Block::List { ordered, items }
}

fn parse_code_block<'a, I>(events: &mut I, end: TagEnd, kind: CodeBlockKind<'_>) -> Block
where
    I: Iterator<Item = Event<'a>>,
{
    let language = match kind {
        CodeBlockKind::Fenced(info) => {
            let info = info.trim();
            if info.is_empty() {
                None
            } else {
                info.split_whitespace().next().map(ToOwned::to_owned)
            }
        }
        CodeBlockKind::Indented => None,
    };
    let mut code = String::new();
    while let Some(event) = events.next() {
        match event {
            Event::Text(text) => code.push_str(&text),
            Event::End(e) if e == end => break,
            _ => {}
        }
    }
    Block::CodeBlock {
        language,
        code: code.trim_end_matches('\n').to_string(),
    }
}

fn parse_table<'a, I>(events: &mut I, end: TagEnd) -> Block
where
    I: Iterator<Item = Event<'a>>,
{
    let mut header = Vec::new();
    let mut rows = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::TableHead) => {
                header = parse_table_row(events, TagEnd::TableHead);
            }
            Event::Start(Tag::TableRow) => {
                rows.push(parse_table_row(events, TagEnd::TableRow));
            }
            Event::End(e) if e == end => break,
            _ => {}
        }
    }
    Block::Table { header, rows }
}

fn parse_table_row<'a, I>(events: &mut I, until: TagEnd) -> Vec<Vec<Inline>>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut cells = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(tag @ Tag::TableCell) => {
                let cell_end = tag.to_end();
                cells.push(trim_inlines(parse_inline_seq(events, cell_end)));
            }
            Event::End(e) if e == until => break,
            _ => {}
        }
    }
    cells
}

fn parse_inline_seq<'a, I>(events: &mut I, until: TagEnd) -> Vec<Inline>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut out = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::End(end) if end == until => break,
            Event::Start(tag) => {
                if let Some(inline) = inline_from_start(tag, events) {
                    out.push(inline);
                }
            }
            Event::Text(text) => push_parsed_text(&mut out, &text),
            Event::Code(code) => out.push(Inline::Code(code.to_string())),
            Event::SoftBreak => push_parsed_text(&mut out, " "),
            Event::HardBreak => out.push(Inline::LineBreak),
            Event::Html(text) | Event::InlineHtml(text) => push_parsed_text(&mut out, &text),
            Event::End(_) => break,
            _ => {}
        }
    }
    out
}

fn inline_from_start<'a, I>(tag: Tag<'a>, events: &mut I) -> Option<Inline>
where
    I: Iterator<Item = Event<'a>>,
{
    let end = tag.to_end();
    match tag {
        Tag::Emphasis => Some(Inline::Emphasis(parse_inline_seq(events, end))),
        Tag::Strong => Some(Inline::Strong(parse_inline_seq(events, end))),
        Tag::Strikethrough => Some(Inline::Strikethrough(parse_inline_seq(events, end))),
        Tag::Link {
            dest_url, title, ..
        } => Some(Inline::Link {
            url: dest_url.to_string(),
            title: if title.is_empty() {
                None
            } else {
                Some(title.to_string())
            },
            content: parse_inline_seq(events, end),
        }),
        Tag::Image { dest_url, .. } => {
            let alt = plain_text(&parse_inline_seq(events, end));
            Some(Inline::Image {
                url: dest_url.to_string(),
                alt,
            })
        }
        _ => {
            // Unexpected nested block: flatten its inline content.
            let inner = parse_inline_seq(events, end);
            if inner.is_empty() {
                None
            } else {
                Some(Inline::Text(plain_text(&inner)))
            }
        }
    }
}

/// Loose inline content (tight list items, stray events) becomes a
/// paragraph, like the converter's collector does at block boundaries.
fn flush_pending(pending: &mut Vec<Inline>, blocks: &mut Vec<Block>) {
    let inlines = trim_inlines(std::mem::take(pending));
    if !inlines.is_empty() {
        blocks.push(Block::Paragraph(inlines));
    }
}

fn push_parsed_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Inline::Text(text.to_string()));
    }
}

fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Emphasis(content)
            | Inline::Strong(content)
            | Inline::Strikethrough(content) => out.push_str(&plain_text(content)),
            Inline::Link { content, .. } => out.push_str(&plain_text(content)),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::LineBreak => out.push(' '),
        }
    }
    out
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
