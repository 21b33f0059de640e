use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_HISTORY_LIMIT;
use crate::error::ConfigError;

/// Editor settings that outlive a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old configs
pub struct EditorConfig {
    /// Maximum number of undo entries kept
    pub history_limit: usize,
    /// Largest single undo entry accepted, in bytes. `None` means unbounded.
    pub max_entry_bytes: Option<usize>,
    /// Memory allowed for one canvas capture, in bytes. Larger canvases are
    /// edited without undo. `None` means unbounded.
    pub max_capture_bytes: Option<usize>,
    /// Directories searched for cursor resources, in order
    pub cursor_dirs: Vec<PathBuf>,
    /// RGBA color used with the primary pointer button
    pub primary_color: [u8; 4],
    /// RGBA color used with the secondary pointer button
    pub secondary_color: [u8; 4],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_entry_bytes: None,
            max_capture_bytes: None,
            cursor_dirs: Vec::new(),
            primary_color: [0, 0, 0, 255],
            secondary_color: [255, 255, 255, 255],
        }
    }
}

impl EditorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
