#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the system clipboard and classify its contents.
    ReadClipboard,
    /// Convert captured HTML to Markdown through the engine pipeline.
    ConvertHtml { html: String },
    /// Run the already-Markdown detector over captured plain text.
    DetectMarkdown { text: String },
    /// Write converted Markdown back to the system clipboard as plain text.
    WriteClipboard { text: String },
    /// Load the shared document from the session store.
    LoadDocument,
    /// Persist the document to the session store.
    SaveDocument { value: String },
    /// (Re)arm the debounce timer; completions carrying a stale generation
    /// are ignored by `update`.
    ArmDebounce { generation: u64 },
    /// Arm the auto-hide timeout for the current notification.
    ArmNotificationTimeout,
}
