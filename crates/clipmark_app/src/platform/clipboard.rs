use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use clipmark_engine::{
    ClipboardError, ClipboardItem, ClipboardPayload, ClipboardProvider, MIME_HTML, MIME_PLAIN,
};

/// Desktop clipboard backed by `clipboard-rs`.
///
/// Reads are snapshotted eagerly: desktop clipboards hand over content per
/// format immediately, unlike the browser's deferred item blobs, so one
/// locked pass collects everything the capture flow might pick.
pub struct SystemClipboard {
    ctx: Arc<Mutex<ClipboardContext>>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let ctx = ClipboardContext::new().map_err(|err| ClipboardError::Access(err.to_string()))?;
        Ok(Self {
            ctx: Arc::new(Mutex::new(ctx)),
        })
    }
}

struct SnapshotItem {
    types: Vec<String>,
    entries: Vec<(String, Bytes)>,
}

#[async_trait]
impl ClipboardItem for SnapshotItem {
    fn types(&self) -> &[String] {
        &self.types
    }

    async fn data(&self, mime: &str) -> Result<Bytes, ClipboardError> {
        self.entries
            .iter()
            .find(|(tag, _)| tag == mime)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| ClipboardError::MissingData(mime.to_string()))
    }
}

#[async_trait]
impl ClipboardProvider for SystemClipboard {
    async fn read(&self) -> Result<ClipboardPayload, ClipboardError> {
        let mut entries = Vec::new();
        {
            let ctx = self
                .ctx
                .lock()
                .map_err(|_| ClipboardError::Access("clipboard mutex poisoned".into()))?;
            if ctx.has(ContentFormat::Html) {
                if let Ok(html) = ctx.get_html() {
                    entries.push((MIME_HTML.to_string(), Bytes::from(html.into_bytes())));
                }
            }
            if ctx.has(ContentFormat::Text) {
                if let Ok(text) = ctx.get_text() {
                    entries.push((MIME_PLAIN.to_string(), Bytes::from(text.into_bytes())));
                }
            }
        }

        if entries.is_empty() {
            return Ok(ClipboardPayload { items: Vec::new() });
        }
        let types = entries.iter().map(|(tag, _)| tag.clone()).collect();
        Ok(ClipboardPayload {
            items: vec![Box::new(SnapshotItem { types, entries })],
        })
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let ctx = self
            .ctx
            .lock()
            .map_err(|_| ClipboardError::Access("clipboard mutex poisoned".into()))?;
        ctx.set_text(text.to_string())
            .map_err(|err| ClipboardError::Access(err.to_string()))
    }
}
