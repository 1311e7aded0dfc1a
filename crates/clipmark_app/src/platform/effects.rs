use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use clip_logging::clip_error;
use clipmark_core::{Capture, Effect, Msg};
use clipmark_engine::{
    convert_html_to_markdown, is_markdown_text, ClipboardError, ClipboardProvider, DocumentStore,
};

/// Executes core effects on a dedicated runtime thread and feeds every
/// completion back to the context as a message.
///
/// Every non-timer effect produces exactly one reply message, so callers can
/// count outstanding replies to know when a cycle is quiescent.
pub struct EffectRunner {
    cmd_tx: mpsc::Sender<Vec<Effect>>,
}

impl EffectRunner {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        clipboard: Arc<dyn ClipboardProvider>,
        msg_tx: mpsc::Sender<Msg>,
        debounce: Duration,
        notification_timeout: Duration,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Vec<Effect>>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");

            // Store change notifications fan in as messages like any other
            // completion. The writer's own change arrives here too; the
            // core's guard is what suppresses the self-triggered reload.
            let mut listener = store.watch();
            let change_tx = msg_tx.clone();
            runtime.spawn(async move {
                while listener.changed().await {
                    if change_tx.send(Msg::StoreChanged).is_err() {
                        break;
                    }
                }
            });

            while let Ok(effects) = cmd_rx.recv() {
                for effect in effects {
                    let store = store.clone();
                    let clipboard = clipboard.clone();
                    let msg_tx = msg_tx.clone();
                    runtime.spawn(async move {
                        let reply =
                            run_effect(effect, store, clipboard, debounce, notification_timeout)
                                .await;
                        let _ = msg_tx.send(reply);
                    });
                }
            }
        });

        Self { cmd_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        let _ = self.cmd_tx.send(effects);
    }
}

async fn run_effect(
    effect: Effect,
    store: Arc<dyn DocumentStore>,
    clipboard: Arc<dyn ClipboardProvider>,
    debounce: Duration,
    notification_timeout: Duration,
) -> Msg {
    match effect {
        Effect::ReadClipboard => match read_and_classify(clipboard.as_ref()).await {
            Ok(capture) => Msg::ClipboardCaptured(capture),
            Err(err) => Msg::ClipboardFailed(err.to_string()),
        },
        Effect::ConvertHtml { html } => Msg::ConversionCompleted {
            result: convert_html_to_markdown(&html).map_err(|err| err.to_string()),
        },
        Effect::DetectMarkdown { text } => {
            let is_markdown = is_markdown_text(&text);
            Msg::DetectionCompleted { text, is_markdown }
        }
        Effect::WriteClipboard { text } => match clipboard.write_text(&text).await {
            Ok(()) => Msg::NoOp,
            Err(err) => Msg::ClipboardFailed(err.to_string()),
        },
        Effect::LoadDocument => match store.get().await {
            Ok(value) => Msg::LoadCompleted { value },
            Err(err) => {
                // Storage failures are logged, not surfaced; the completion
                // must still arrive so the reentrancy guard resets.
                clip_error!("loading shared document failed: {err}");
                Msg::LoadCompleted { value: None }
            }
        },
        Effect::SaveDocument { value } => {
            if let Err(err) = store.set(&value).await {
                clip_error!("saving shared document failed: {err}");
            }
            Msg::SaveCompleted
        }
        Effect::ArmDebounce { generation } => {
            tokio::time::sleep(debounce).await;
            Msg::DebounceElapsed { generation }
        }
        Effect::ArmNotificationTimeout => {
            tokio::time::sleep(notification_timeout).await;
            Msg::NotificationExpired
        }
    }
}

async fn read_and_classify(clipboard: &dyn ClipboardProvider) -> Result<Capture, ClipboardError> {
    let payload = clipboard.read().await?;
    let classified = clipmark_engine::capture(&payload).await?;
    Ok(map_capture(classified))
}

fn map_capture(classified: clipmark_engine::Capture) -> Capture {
    match classified {
        clipmark_engine::Capture::Markdown(text) => Capture::Markdown(text),
        clipmark_engine::Capture::Html(html) => Capture::Html(html),
        clipmark_engine::Capture::Plain(text) => Capture::Plain(text),
        clipmark_engine::Capture::Empty => Capture::Empty,
    }
}
