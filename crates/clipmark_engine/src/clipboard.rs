use async_trait::async_trait;
use bytes::Bytes;
use clip_logging::clip_debug;

use crate::decode::decode_clipboard_text;
use crate::types::ClipboardError;

pub const MIME_HTML: &str = "text/html";
pub const MIME_PLAIN: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";
pub const MIME_X_MARKDOWN: &str = "text/x-markdown";

/// One clipboard item: a set of available type tags plus an asynchronous
/// byte accessor per tag.
#[async_trait]
pub trait ClipboardItem: Send + Sync {
    fn types(&self) -> &[String];

    /// Content for one advertised tag. Implementations may touch the
    /// platform clipboard again, hence async and fallible.
    async fn data(&self, mime: &str) -> Result<Bytes, ClipboardError>;
}

/// Everything the platform clipboard offered for one read, in order.
pub struct ClipboardPayload {
    pub items: Vec<Box<dyn ClipboardItem>>,
}

/// Platform clipboard access, injected so the capture flow is testable
/// without a live clipboard.
#[async_trait]
pub trait ClipboardProvider: Send + Sync {
    async fn read(&self) -> Result<ClipboardPayload, ClipboardError>;
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Classified result of one capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// An item carried an explicit Markdown type; taken as-is.
    Markdown(String),
    /// Rich text HTML, possibly empty.
    Html(String),
    /// Plain text; the caller decides whether to run the detector.
    Plain(String),
    /// Nothing usable.
    Empty,
}

/// Selects and decodes the best representation from a payload.
///
/// Priority: explicit Markdown MIME type, then HTML, then plain text.
pub async fn capture(payload: &ClipboardPayload) -> Result<Capture, ClipboardError> {
    if let Some(item) = find_item(payload, &[MIME_MARKDOWN, MIME_X_MARKDOWN]) {
        let tag = item
            .types()
            .iter()
            .find(|t| t.contains("markdown"))
            .cloned()
            .unwrap_or_else(|| MIME_PLAIN.to_string());
        let text = read_text(item, &tag).await?;
        if !text.is_empty() {
            clip_debug!("capture: explicit markdown item ({} chars)", text.len());
            return Ok(Capture::Markdown(text));
        }
    }

    if let Some(item) = find_item(payload, &[MIME_HTML]) {
        let html = read_text(item, MIME_HTML).await?;
        clip_debug!("capture: html item ({} chars)", html.len());
        return Ok(Capture::Html(html));
    }

    if let Some(item) = find_item(payload, &[MIME_PLAIN]) {
        let text = read_text(item, MIME_PLAIN).await?;
        if !text.is_empty() {
            return Ok(Capture::Plain(text));
        }
    }

    Ok(Capture::Empty)
}

fn find_item<'a>(payload: &'a ClipboardPayload, tags: &[&str]) -> Option<&'a dyn ClipboardItem> {
    payload
        .items
        .iter()
        .find(|item| item.types().iter().any(|t| tags.contains(&t.as_str())))
        .map(Box::as_ref)
}

async fn read_text(item: &dyn ClipboardItem, tag: &str) -> Result<String, ClipboardError> {
    let bytes = item.data(tag).await?;
    let decoded = decode_clipboard_text(&bytes, None)?;
    Ok(decoded.text)
}
