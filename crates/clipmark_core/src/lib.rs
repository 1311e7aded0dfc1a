//! Clipmark core: pure per-context state machine for capture and sync.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Capture, Msg};
pub use state::ContextState;
pub use update::{
    update, FALLBACK_NO_TEXT, FALLBACK_ONLY_PLAIN, MSG_CONVERTED, MSG_MARKDOWN_DETECTED,
    MSG_NOTHING_TO_CONVERT, MSG_NO_RICH_TEXT,
};
pub use view_model::ContextViewModel;
