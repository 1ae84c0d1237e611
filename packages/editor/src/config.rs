use pagesmith_document::Breakpoint;
use std::time::Duration;

/// Quiet period before an autosave fires
pub const DEFAULT_AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Longest quiet period the autosave scheduler accepts
pub const MAX_AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(24 * 60 * 60);

/// Undo levels kept before the oldest are evicted (0 = unlimited)
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Editor session settings
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub autosave_debounce: Duration,
    pub history_limit: usize,
    pub initial_breakpoint: Breakpoint,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_debounce: DEFAULT_AUTOSAVE_DEBOUNCE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            initial_breakpoint: Breakpoint::Desktop,
        }
    }
}
