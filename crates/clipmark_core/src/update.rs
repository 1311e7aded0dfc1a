use crate::{Capture, ContextState, Effect, Msg};

/// Notification shown when an explicit Markdown clipboard item was adopted.
pub const MSG_MARKDOWN_DETECTED: &str =
    "Markdown detected in clipboard. Open the editor to change it.";
/// Notification shown when nothing convertible was found.
pub const MSG_NOTHING_TO_CONVERT: &str = "No rich text found in clipboard. Already converted?";
/// Notification shown when only empty rich text was found.
pub const MSG_NO_RICH_TEXT: &str = "No rich text found in clipboard.";
/// Notification shown after a successful conversion and clipboard write-back.
pub const MSG_CONVERTED: &str = "Converted clipboard to Markdown and copied it back.";

/// Fallback document shown when the HTML representation was empty.
pub const FALLBACK_ONLY_PLAIN: &str =
    "Only plain text found in clipboard. Copy rich text from a web page or document first.";
/// Fallback document shown when conversion produced nothing.
pub const FALLBACK_NO_TEXT: &str =
    "No text found in clipboard. Copy rich text from a web page or document first.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ContextState, msg: Msg) -> (ContextState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => request_load(&mut state),
        Msg::CaptureClicked => vec![Effect::ReadClipboard],
        Msg::ClipboardCaptured(capture) => apply_capture(&mut state, capture),
        Msg::ClipboardFailed(message) => {
            notify(&mut state, format!("Was not able to process clipboard. {message}."))
        }
        Msg::ConversionCompleted { result } => apply_conversion(&mut state, result),
        Msg::DetectionCompleted { text, is_markdown } => {
            if is_markdown {
                adopt_markdown(&mut state, text)
            } else {
                notify(&mut state, MSG_NOTHING_TO_CONVERT)
            }
        }
        Msg::EditChanged(value) => {
            let generation = state.record_edit(value);
            vec![Effect::ArmDebounce { generation }]
        }
        Msg::DebounceElapsed { generation } => match state.take_pending_edit(generation) {
            Some(value) => request_save(&mut state, value),
            None => Vec::new(),
        },
        Msg::LoadCompleted { value } => {
            state.finish_load();
            if let Some(value) = value {
                state.set_document(value);
            }
            Vec::new()
        }
        Msg::SaveCompleted => {
            state.finish_save();
            Vec::new()
        }
        Msg::StoreChanged => {
            // Our own write echoes back through the store's change
            // notification; while either guard is in flight the change is
            // either self-inflicted or already being fetched.
            if state.load_in_flight() || state.save_in_flight() {
                Vec::new()
            } else {
                request_load(&mut state)
            }
        }
        Msg::ClearClicked => {
            state.set_document("");
            state.drop_pending_edit();
            request_save(&mut state, String::new())
        }
        Msg::NotificationExpired => {
            state.clear_notification();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_capture(state: &mut ContextState, capture: Capture) -> Vec<Effect> {
    match capture {
        Capture::Markdown(text) => adopt_markdown(state, text),
        Capture::Html(html) => {
            if html.trim().is_empty() {
                state.set_document(FALLBACK_ONLY_PLAIN);
                notify(state, MSG_NO_RICH_TEXT)
            } else {
                vec![Effect::ConvertHtml { html }]
            }
        }
        Capture::Plain(text) => vec![Effect::DetectMarkdown { text }],
        Capture::Empty => notify(state, MSG_NOTHING_TO_CONVERT),
    }
}

fn apply_conversion(state: &mut ContextState, result: Result<String, String>) -> Vec<Effect> {
    match result {
        Ok(markdown) if markdown.is_empty() => {
            state.set_document(FALLBACK_NO_TEXT);
            notify(state, MSG_NO_RICH_TEXT)
        }
        Ok(markdown) => {
            state.set_document(markdown.clone());
            let mut effects = vec![Effect::WriteClipboard {
                text: markdown.clone(),
            }];
            effects.extend(request_save(state, markdown));
            effects.extend(notify(state, MSG_CONVERTED));
            effects
        }
        Err(message) => {
            // Conversion failures are non-fatal: show an explanatory
            // fallback instead of the document.
            state.set_document(format!("Could not convert clipboard contents: {message}"));
            notify(state, MSG_NO_RICH_TEXT)
        }
    }
}

/// Adopts text that is already Markdown: displayed and committed, but never
/// written back to the clipboard.
fn adopt_markdown(state: &mut ContextState, text: String) -> Vec<Effect> {
    state.set_document(text.clone());
    let mut effects = request_save(state, text);
    effects.extend(notify(state, MSG_MARKDOWN_DETECTED));
    effects
}

fn request_load(state: &mut ContextState) -> Vec<Effect> {
    if state.load_in_flight() {
        return Vec::new();
    }
    state.begin_load();
    vec![Effect::LoadDocument]
}

/// Saves through the reentrancy guard: a request while a save is already in
/// flight is dropped, not queued.
fn request_save(state: &mut ContextState, value: String) -> Vec<Effect> {
    if state.save_in_flight() {
        return Vec::new();
    }
    state.begin_save();
    vec![Effect::SaveDocument { value }]
}

fn notify(state: &mut ContextState, message: impl Into<String>) -> Vec<Effect> {
    state.set_notification(message);
    vec![Effect::ArmNotificationTimeout]
}
