use crate::errors::{WorkspaceError, WorkspaceResult};
use pagesmith_document::Breakpoint;
use pagesmith_editor::{
    EditorConfig, DEFAULT_AUTOSAVE_DEBOUNCE, DEFAULT_HISTORY_LIMIT, MAX_AUTOSAVE_DEBOUNCE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagesmith.config.json";

/// Pagesmith configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Directory holding one JSON file per document
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Quiet period before an autosave, in milliseconds
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Undo levels to keep (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Breakpoint a new session starts on
    #[serde(default)]
    pub default_breakpoint: Breakpoint,
}

fn default_data_dir() -> String {
    ".pagesmith".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    DEFAULT_AUTOSAVE_DEBOUNCE.as_millis() as u64
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl WorkspaceConfig {
    /// Load `pagesmith.config.json` from a directory, falling back to
    /// defaults when there is none
    pub fn load(cwd: &Path) -> WorkspaceResult<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load an explicitly named config file. Unlike `load`, a missing file
    /// is an error.
    pub fn load_from(path: &Path) -> WorkspaceResult<Self> {
        if !path.exists() {
            return Err(WorkspaceError::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| WorkspaceError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Absolute path to the data directory
    pub fn data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }

    /// Editor settings; the debounce is capped at `MAX_AUTOSAVE_DEBOUNCE`
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            autosave_debounce: Duration::from_millis(self.autosave_debounce_ms)
                .min(MAX_AUTOSAVE_DEBOUNCE),
            history_limit: self.history_limit,
            initial_breakpoint: self.default_breakpoint,
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            history_limit: default_history_limit(),
            default_breakpoint: Breakpoint::Desktop,
        }
    }
}
