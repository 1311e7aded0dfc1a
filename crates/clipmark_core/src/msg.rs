/// Classified clipboard contents, already decoded to text by the platform layer.
///
/// The platform layer reads at most one representation, chosen by MIME
/// priority: explicit Markdown type first, then HTML, then plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// An item advertised `text/markdown` or `text/x-markdown`.
    Markdown(String),
    /// Rich text HTML was present.
    Html(String),
    /// Only plain text was present; needs the detector.
    Plain(String),
    /// Nothing usable on the clipboard.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Context started; restore the shared document from the store.
    Mounted,
    /// User requested a clipboard capture ("Modify Clipboard").
    CaptureClicked,
    /// Platform layer finished reading and classifying the clipboard.
    ClipboardCaptured(Capture),
    /// Clipboard read or write failed at the platform boundary.
    ClipboardFailed(String),
    /// Engine finished converting captured HTML to Markdown.
    ConversionCompleted { result: Result<String, String> },
    /// Engine classified captured plain text.
    DetectionCompleted { text: String, is_markdown: bool },
    /// User edited the document locally (editor surface, debounced).
    EditChanged(String),
    /// A previously armed debounce timer fired.
    DebounceElapsed { generation: u64 },
    /// Store `get` completed.
    LoadCompleted { value: Option<String> },
    /// Store `set` completed.
    SaveCompleted,
    /// The store reported a changed value (any context, including our own).
    StoreChanged,
    /// User clicked Clear.
    ClearClicked,
    /// The notification auto-hide timeout fired.
    NotificationExpired,
    /// Fallback for placeholder wiring.
    NoOp,
}
