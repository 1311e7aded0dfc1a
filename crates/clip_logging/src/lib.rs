#![deny(missing_docs)]
//! Shared logging utilities for the clipmark workspace.
//!
//! This crate provides the `clip_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

/// Identifies which UI surface the current thread is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// No surface assigned yet (engine threads, tests).
    #[default]
    None,
    /// The compact capture popup.
    Popup,
    /// The full editor view.
    Editor,
}

impl Surface {
    /// Short label used as a log prefix.
    pub fn label(self) -> &'static str {
        match self {
            Surface::None => "-",
            Surface::Popup => "popup",
            Surface::Editor => "editor",
        }
    }
}

thread_local! {
    /// Thread-local storage for the surface this thread belongs to.
    static SURFACE: Cell<Surface> = const { Cell::new(Surface::None) };
}

/// Sets the surface label for the current thread.
/// This should be called once when a UI context thread starts.
pub fn set_surface(surface: Surface) {
    SURFACE.with(|v| v.set(surface));
}

/// Retrieves the surface label for the current thread.
/// Returns `Surface::None` if none has been set.
pub fn get_surface() -> Surface {
    SURFACE.with(|v| v.get())
}

/// Logs a trace-level message, prefixed with the thread's surface label.
#[macro_export]
macro_rules! clip_trace {
    ($($arg:tt)*) => {{
        log::trace!("[{}] {}", $crate::get_surface().label(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message, prefixed with the thread's surface label.
#[macro_export]
macro_rules! clip_info {
    ($($arg:tt)*) => {{
        log::info!("[{}] {}", $crate::get_surface().label(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message, prefixed with the thread's surface label.
#[macro_export]
macro_rules! clip_debug {
    ($($arg:tt)*) => {{
        log::debug!("[{}] {}", $crate::get_surface().label(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message, prefixed with the thread's surface label.
#[macro_export]
macro_rules! clip_warn {
    ($($arg:tt)*) => {{
        log::warn!("[{}] {}", $crate::get_surface().label(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message, prefixed with the thread's surface label.
#[macro_export]
macro_rules! clip_error {
    ($($arg:tt)*) => {{
        log::error!("[{}] {}", $crate::get_surface().label(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CaptureLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        lines: Mutex::new(Vec::new()),
    };

    #[test]
    fn macros_prefix_the_surface_label() {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);

        set_surface(Surface::Popup);
        clip_info!("captured {} items", 2);
        set_surface(Surface::None);
        clip_warn!("plain");

        let lines = LOGGER.lines.lock().unwrap();
        assert!(lines.iter().any(|line| line == "[popup] captured 2 items"));
        assert!(lines.iter().any(|line| line == "[-] plain"));
    }
}
