use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::todo::TodoFilter;

const STATE_FILE: &str = ".tada-state.json";

/// Persisted TUI state (written to .tada-state.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which tab is showing ("todos" or "projects")
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub todo_filter: TodoFilter,
    #[serde(default)]
    pub project_filter: TodoFilter,
    /// Project open in the Projects tab
    #[serde(default)]
    pub current_project: Option<String>,
    /// Last search pattern
    #[serde(default)]
    pub last_search: Option<String>,
}

/// Read .tada-state.json from the data directory
pub fn read_ui_state(root: &Path) -> Option<UiState> {
    let content = fs::read_to_string(root.join(STATE_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .tada-state.json to the data directory
pub fn write_ui_state(root: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(root.join(STATE_FILE), content)
}
