//! Platform logging initialization for clipmark_app.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

/// Where log output goes. The file sink lives next to the session document
/// so one directory holds everything a session produced.
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum LogDestination<'a> {
    Terminal,
    File(&'a Path),
    Both(&'a Path),
}

/// Initialize the global logger. Failing to open the log file degrades to
/// terminal-only logging rather than aborting.
pub fn initialize(destination: LogDestination<'_>) {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut sinks: Vec<Box<dyn SharedLogger>> = Vec::new();
    let file_path = match destination {
        LogDestination::Terminal => None,
        LogDestination::File(path) => Some(path),
        LogDestination::Both(path) => Some(path),
    };
    if let Some(path) = file_path {
        match File::create(path) {
            Ok(file) => sinks.push(WriteLogger::new(level, config.clone(), file)),
            Err(err) => eprintln!("could not create log file at {path:?}: {err}"),
        }
    }
    if sinks.is_empty() || matches!(destination, LogDestination::Both(_)) {
        sinks.push(TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    let _ = CombinedLogger::init(sinks);
}
