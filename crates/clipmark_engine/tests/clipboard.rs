use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use clipmark_engine::{
    capture, decode_clipboard_text, Capture, ClipboardError, ClipboardItem, ClipboardPayload,
    MIME_HTML, MIME_MARKDOWN, MIME_PLAIN,
};
use pretty_assertions::assert_eq;

struct FakeItem {
    types: Vec<String>,
    data: HashMap<String, Bytes>,
}

impl FakeItem {
    fn new(entries: &[(&str, &str)]) -> Box<dyn ClipboardItem> {
        Box::new(Self {
            types: entries.iter().map(|(tag, _)| tag.to_string()).collect(),
            data: entries
                .iter()
                .map(|(tag, content)| (tag.to_string(), Bytes::copy_from_slice(content.as_bytes())))
                .collect(),
        })
    }
}

#[async_trait]
impl ClipboardItem for FakeItem {
    fn types(&self) -> &[String] {
        &self.types
    }

    async fn data(&self, mime: &str) -> Result<Bytes, ClipboardError> {
        self.data
            .get(mime)
            .cloned()
            .ok_or_else(|| ClipboardError::MissingData(mime.to_string()))
    }
}

fn payload(items: Vec<Box<dyn ClipboardItem>>) -> ClipboardPayload {
    ClipboardPayload { items }
}

#[tokio::test]
async fn explicit_markdown_type_wins_over_html() {
    let payload = payload(vec![FakeItem::new(&[
        (MIME_HTML, "<p>hi</p>"),
        (MIME_MARKDOWN, "# hi"),
    ])]);
    assert_eq!(
        capture(&payload).await.unwrap(),
        Capture::Markdown("# hi".into())
    );
}

#[tokio::test]
async fn html_wins_over_plain_text() {
    let payload = payload(vec![
        FakeItem::new(&[(MIME_PLAIN, "hi")]),
        FakeItem::new(&[(MIME_HTML, "<p>hi</p>")]),
    ]);
    assert_eq!(
        capture(&payload).await.unwrap(),
        Capture::Html("<p>hi</p>".into())
    );
}

#[tokio::test]
async fn empty_html_is_reported_as_html() {
    // An item advertising HTML with empty content still selects the HTML
    // branch; the caller decides what to tell the user.
    let payload = payload(vec![FakeItem::new(&[(MIME_HTML, "")])]);
    assert_eq!(capture(&payload).await.unwrap(), Capture::Html(String::new()));
}

#[tokio::test]
async fn plain_text_falls_through() {
    let payload = payload(vec![FakeItem::new(&[(MIME_PLAIN, "- maybe markdown")])]);
    assert_eq!(
        capture(&payload).await.unwrap(),
        Capture::Plain("- maybe markdown".into())
    );
}

#[tokio::test]
async fn empty_markdown_item_falls_back_to_html() {
    let payload = payload(vec![
        FakeItem::new(&[(MIME_MARKDOWN, "")]),
        FakeItem::new(&[(MIME_HTML, "<p>hi</p>")]),
    ]);
    assert_eq!(
        capture(&payload).await.unwrap(),
        Capture::Html("<p>hi</p>".into())
    );
}

#[tokio::test]
async fn nothing_usable_is_empty() {
    assert_eq!(capture(&payload(vec![])).await.unwrap(), Capture::Empty);
    let blank = payload(vec![FakeItem::new(&[(MIME_PLAIN, "")])]);
    assert_eq!(capture(&blank).await.unwrap(), Capture::Empty);
}

#[test]
fn decode_respects_declared_charset() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_clipboard_text(bytes, Some("ISO-8859-1")).unwrap();
    assert_eq!(decoded.text, "café");
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_clipboard_text(bytes, None).unwrap();
    assert_eq!(decoded.text, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_guesses_plain_utf8() {
    let decoded = decode_clipboard_text("héllo".as_bytes(), None).unwrap();
    assert_eq!(decoded.text, "héllo");
}
