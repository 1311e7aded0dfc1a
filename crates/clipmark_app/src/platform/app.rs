use std::sync::{mpsc, Arc};
use std::time::Duration;

use clip_logging::{clip_debug, clip_warn, Surface};
use clipmark_core::{update, ContextState, ContextViewModel, Effect, Msg};
use clipmark_engine::{ClipboardProvider, DocumentStore};

use super::effects::EffectRunner;

const DEBOUNCE: Duration = Duration::from_millis(350);
const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);
/// Upper bound on waiting for a single effect completion.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Drives one popup capture cycle to completion and returns the final view.
///
/// Headless equivalent of opening the popup and pressing the capture button:
/// mount (restores the shared document), settle, capture, settle again. The
/// cycle is quiescent once every dispatched non-timer effect has replied.
pub fn run_capture_cycle(
    store: Arc<dyn DocumentStore>,
    clipboard: Arc<dyn ClipboardProvider>,
) -> ContextViewModel {
    clip_logging::set_surface(Surface::Popup);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(store, clipboard, msg_tx, DEBOUNCE, NOTIFICATION_TIMEOUT);

    let mut cycle = Cycle {
        state: ContextState::new(),
        pending: 0,
        runner,
        msg_rx,
    };

    cycle.dispatch(Msg::Mounted);
    cycle.settle();
    cycle.dispatch(Msg::CaptureClicked);
    cycle.settle();

    cycle.state.view()
}

struct Cycle {
    state: ContextState,
    pending: usize,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl Cycle {
    fn dispatch(&mut self, msg: Msg) {
        if is_completion(&msg) {
            self.pending = self.pending.saturating_sub(1);
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            clip_debug!(
                "view updated: {} chars, notification={:?}",
                state.document().len(),
                state.view().notification
            );
        }
        self.state = state;

        self.pending += effects.iter().filter(|e| !is_timer(e)).count();
        self.runner.enqueue(effects);
    }

    fn settle(&mut self) {
        while self.pending > 0 {
            match self.msg_rx.recv_timeout(SETTLE_TIMEOUT) {
                Ok(msg) => self.dispatch(msg),
                Err(_) => {
                    clip_warn!("gave up waiting for {} effect completions", self.pending);
                    break;
                }
            }
        }
    }
}

/// Timer effects reply on their own schedule and never gate quiescence.
fn is_timer(effect: &Effect) -> bool {
    matches!(
        effect,
        Effect::ArmDebounce { .. } | Effect::ArmNotificationTimeout
    )
}

/// Whether a message is the reply to a previously dispatched non-timer
/// effect. Timer firings and store change notifications arrive unsolicited.
fn is_completion(msg: &Msg) -> bool {
    !matches!(
        msg,
        Msg::Mounted
            | Msg::CaptureClicked
            | Msg::EditChanged(_)
            | Msg::ClearClicked
            | Msg::StoreChanged
            | Msg::DebounceElapsed { .. }
            | Msg::NotificationExpired
    )
}
