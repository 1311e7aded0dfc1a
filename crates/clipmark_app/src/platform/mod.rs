pub mod app;
pub mod clipboard;
pub mod effects;
pub mod logging;
pub mod persistence;
