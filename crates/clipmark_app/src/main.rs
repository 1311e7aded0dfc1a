mod platform;

use std::sync::Arc;

use clip_logging::clip_info;
use clipmark_engine::SessionFileStore;

use platform::clipboard::SystemClipboard;
use platform::logging::{initialize, LogDestination};

fn main() {
    let data_dir = std::env::temp_dir().join("clipmark");
    let log_path = data_dir.join("clipmark.log");
    if std::fs::create_dir_all(&data_dir).is_err() {
        initialize(LogDestination::Terminal);
    } else {
        initialize(LogDestination::Both(&log_path));
    }

    let prefs = platform::persistence::load_prefs(&data_dir);
    clip_info!(
        "starting capture cycle, textarea_height={:?}",
        prefs.textarea_height
    );

    let store = Arc::new(SessionFileStore::new(data_dir.join("session_document.md")));
    let clipboard = match SystemClipboard::new() {
        Ok(provider) => Arc::new(provider),
        Err(err) => {
            eprintln!("clipboard unavailable: {err}");
            std::process::exit(1);
        }
    };

    let view = platform::app::run_capture_cycle(store, clipboard);

    if let Some(note) = &view.notification {
        println!("{note}");
    }
    if !view.document.is_empty() {
        println!("{}", view.document);
    }

    // First run writes the defaults so the editor has a file to update.
    platform::persistence::save_prefs(&data_dir, &prefs);
}
