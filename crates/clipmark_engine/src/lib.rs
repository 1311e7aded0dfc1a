//! Clipmark engine: HTML→Markdown pipeline, Markdown detection, clipboard
//! payloads and the shared document store.
mod clipboard;
mod convert;
mod decode;
mod detect;
mod document;
mod serialize;
mod store;
mod types;

pub use clipboard::{
    capture, Capture, ClipboardItem, ClipboardPayload, ClipboardProvider, MIME_HTML,
    MIME_MARKDOWN, MIME_PLAIN, MIME_X_MARKDOWN,
};
pub use convert::{convert_html_to_markdown, html_to_blocks};
pub use decode::{decode_clipboard_text, DecodeError, DecodedText};
pub use detect::{is_markdown_text, parse_markdown};
pub use document::{Block, Inline, ListItem};
pub use serialize::serialize;
pub use store::{ChangeListener, DocumentStore, MemoryStore, SessionFileStore};
pub use types::{ClipboardError, ConvertError, StoreError};
