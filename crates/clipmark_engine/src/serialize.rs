//! Document tree -> Markdown text, with a fixed style policy:
//! `-` bullets (`+` one list level down), `_` emphasis, `**` strong, GFM
//! tables/strikethrough/task lists, fenced code blocks and `:::name`
//! directive fences.

use crate::document::{Block, Inline, ListItem};

/// Serializes a document tree to Markdown.
pub fn serialize(blocks: &[Block]) -> String {
    let rendered = render_blocks(blocks, 0);
    if rendered.is_empty() {
        rendered
    } else {
        rendered + "\n"
    }
}

fn render_blocks(blocks: &[Block], list_depth: usize) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, list_depth))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &Block, list_depth: usize) -> String {
    match block {
        Block::Paragraph(inlines) => render_inlines(inlines),
        Block::Heading { level, content } => {
            format!(
                "{} {}",
                "#".repeat(usize::from(*level).clamp(1, 6)),
                render_inlines(content)
            )
        }
        Block::List { ordered, items } => render_list(*ordered, items, list_depth),
        Block::CodeBlock { language, code } => render_code_block(language.as_deref(), code),
        Block::BlockQuote(children) => prefix_lines(&render_blocks(children, 0), "> "),
        Block::Table { header, rows } => render_table(header, rows),
        Block::ThematicBreak => "---".to_string(),
        Block::Directive { name, children } => {
            let body = render_blocks(children, 0);
            if body.is_empty() {
                format!(":::{name}\n:::")
            } else {
                format!(":::{name}\n{body}\n:::")
            }
        }
    }
}

fn render_list(ordered: bool, items: &[ListItem], depth: usize) -> String {
    let mut lines = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let marker = if ordered {
            format!("{}. ", index + 1)
        } else if depth % 2 == 1 {
            // Nested lists switch bullet so the structure stays readable.
            "+ ".to_string()
        } else {
            "- ".to_string()
        };
        let body = render_blocks(&item.blocks, depth + 1);
        let body = match item.checked {
            Some(true) => format!("[x] {body}"),
            Some(false) => format!("[ ] {body}"),
            None => body,
        };
        lines.push(indent_item(&marker, &body));
    }
    lines.join("\n")
}

fn indent_item(marker: &str, body: &str) -> String {
    if body.is_empty() {
        return marker.trim_end().to_string();
    }
    let indent = " ".repeat(marker.len());
    let mut out = String::new();
    for (index, line) in body.lines().enumerate() {
        if index == 0 {
            out.push_str(marker);
            out.push_str(line);
        } else {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
                out.push_str(line);
            }
        }
    }
    out
}

fn render_code_block(language: Option<&str>, code: &str) -> String {
    // The fence must be longer than any backtick run inside the block.
    let mut longest_run = 0;
    let mut run = 0;
    for ch in code.chars() {
        if ch == '`' {
            run += 1;
            longest_run = longest_run.max(run);
        } else {
            run = 0;
        }
    }
    let fence = "`".repeat((longest_run + 1).max(3));
    let language = language.unwrap_or_default();
    format!("{fence}{language}\n{code}\n{fence}")
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(header: &[Vec<Inline>], rows: &[Vec<Vec<Inline>>]) -> String {
    let columns = header.len().max(1);
    let mut out = table_row(header);
    out.push('\n');
    out.push_str(&format!("|{}", " --- |".repeat(columns)));
    for row in rows {
        out.push('\n');
        out.push_str(&table_row(row));
    }
    out
}

fn table_row(cells: &[Vec<Inline>]) -> String {
    let rendered: Vec<String> = cells
        .iter()
        .map(|cell| {
            render_inlines(cell)
                .replace('\n', " ")
                .replace('|', "\\|")
        })
        .collect();
    format!("| {} |", rendered.join(" | "))
}

fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape_text(text)),
            Inline::Emphasis(content) => {
                out.push('_');
                out.push_str(&render_inlines(content));
                out.push('_');
            }
            Inline::Strong(content) => {
                out.push_str("**");
                out.push_str(&render_inlines(content));
                out.push_str("**");
            }
            Inline::Strikethrough(content) => {
                out.push_str("~~");
                out.push_str(&render_inlines(content));
                out.push_str("~~");
            }
            Inline::Code(code) => out.push_str(&code_span(code)),
            Inline::Link {
                url,
                title,
                content,
            } => {
                let text = render_inlines(content);
                if title.is_none() && (text.is_empty() || text == *url) {
                    // Autolink form for bare URLs.
                    out.push('<');
                    out.push_str(url);
                    out.push('>');
                } else {
                    out.push('[');
                    out.push_str(&text);
                    out.push_str("](");
                    out.push_str(url);
                    if let Some(title) = title {
                        out.push_str(&format!(" \"{title}\""));
                    }
                    out.push(')');
                }
            }
            Inline::Image { url, alt } => {
                out.push_str(&format!("![{}]({url})", escape_text(alt)));
            }
            Inline::LineBreak => out.push_str("\\\n"),
        }
    }
    out
}

fn code_span(code: &str) -> String {
    let mut longest_run = 0;
    let mut run = 0;
    for ch in code.chars() {
        if ch == '`' {
            run += 1;
            longest_run = longest_run.max(run);
        } else {
            run = 0;
        }
    }
    let fence = "`".repeat(longest_run + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

/// Escapes characters that would otherwise be read as markup.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
