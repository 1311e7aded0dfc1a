use std::fs;
use std::path::Path;

use clip_logging::{clip_info, clip_warn};
use serde::{Deserialize, Serialize};

const PREFS_FILENAME: &str = ".clipmark_prefs.ron";

/// Per-user editor preferences. Unlike the shared document these survive the
/// session, so they live in their own file rather than the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EditorPrefs {
    /// Height of the editor textarea in pixels, kept across resizes.
    pub textarea_height: Option<u32>,
}

/// Loads preferences from `prefs_dir`, falling back to defaults when the
/// file is absent or unreadable. A corrupt file is not an error a user can
/// act on, so it only warns.
pub fn load_prefs(prefs_dir: &Path) -> EditorPrefs {
    let path = prefs_dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return EditorPrefs::default();
        }
        Err(err) => {
            clip_warn!("Failed to read preferences from {:?}: {}", path, err);
            return EditorPrefs::default();
        }
    };

    match ron::from_str(&content) {
        Ok(prefs) => {
            clip_info!("Loaded preferences from {:?}", path);
            prefs
        }
        Err(err) => {
            clip_warn!("Failed to parse preferences from {:?}: {}", path, err);
            EditorPrefs::default()
        }
    }
}

pub fn save_prefs(prefs_dir: &Path, prefs: &EditorPrefs) {
    if let Err(err) = fs::create_dir_all(prefs_dir) {
        clip_warn!("Failed to create preferences dir {:?}: {}", prefs_dir, err);
        return;
    }

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(prefs, pretty) {
        Ok(text) => text,
        Err(err) => {
            clip_warn!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let path = prefs_dir.join(PREFS_FILENAME);
    if let Err(err) = fs::write(&path, content) {
        clip_warn!("Failed to write preferences to {:?}: {}", path, err);
    }
}
