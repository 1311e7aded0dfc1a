//! The document-semantic tree both pipeline front-ends produce.
//!
//! One vocabulary is shared by the HTML converter and the Markdown
//! detector so that anything the detector calls "Markdown" is exactly what
//! the serializer would have produced.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    /// Heading levels 1-6.
    Heading { level: u8, content: Vec<Inline> },
    List { ordered: bool, items: Vec<ListItem> },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    BlockQuote(Vec<Block>),
    Table {
        header: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    ThematicBreak,
    /// Fenced, named container (`:::name`), used for admonition-style
    /// blocks round-tripped with the editor surface.
    Directive { name: String, children: Vec<Block> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// `Some` for GFM task-list items.
    pub checked: Option<bool>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Code(String),
    Link {
        url: String,
        title: Option<String>,
        content: Vec<Inline>,
    },
    Image { url: String, alt: String },
    /// Hard line break.
    LineBreak,
}

impl Inline {
    /// Plain text and line breaks carry no structural signal.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Inline::Text(_) | Inline::LineBreak)
    }
}

impl Block {
    /// Whether this block is anything other than a plain paragraph of text.
    pub fn is_structural(&self) -> bool {
        match self {
            Block::Paragraph(inlines) => inlines.iter().any(Inline::is_structural),
            _ => true,
        }
    }
}

/// Trims the whitespace both front-ends leave at paragraph edges and drops
/// inlines that end up empty.
pub(crate) fn trim_inlines(mut inlines: Vec<Inline>) -> Vec<Inline> {
    if let Some(Inline::Text(first)) = inlines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Inline::Text(last)) = inlines.last_mut() {
        *last = last.trim_end().to_string();
    }
    inlines.retain(|inline| !matches!(inline, Inline::Text(text) if text.is_empty()));
    inlines
}
