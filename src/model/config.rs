use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory.
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub fireworks: FireworksConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    /// Hex overrides applied on top of the selected theme, e.g. `accent = "#2867C7"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: ThemeMode::default(),
            colors: HashMap::new(),
            show_key_hints: true,
        }
    }
}

/// Terminal backend options, passed explicitly to the TUI at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Default: true
    #[serde(default = "default_true")]
    pub alternate_screen: bool,
    /// Event poll timeout while idle, in milliseconds. Default: 250
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Poll timeout while an animation is playing. Default: 33
    #[serde(default = "default_animation_tick_ms")]
    pub animation_tick_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            alternate_screen: true,
            tick_rate_ms: default_tick_rate_ms(),
            animation_tick_ms: default_animation_tick_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireworksConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Frame budget before the show winds down. Default: 80
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
    /// Milliseconds between simulation ticks. Default: 100
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Logical canvas size the physics runs in. Default: 500 x 300
    #[serde(default = "default_canvas_width")]
    pub width: f64,
    #[serde(default = "default_canvas_height")]
    pub height: f64,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        FireworksConfig {
            enabled: true,
            max_frames: default_max_frames(),
            frame_ms: default_frame_ms(),
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Global todo list, relative to the data directory. Default: todos.txt
    #[serde(default = "default_todo_file")]
    pub todo_file: String,
    /// Directory holding one file per project. Default: data/project
    #[serde(default = "default_project_dir")]
    pub project_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            todo_file: default_todo_file(),
            project_dir: default_project_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_animation_tick_ms() -> u64 {
    33
}

fn default_max_frames() -> u32 {
    80
}

fn default_frame_ms() -> u64 {
    100
}

fn default_canvas_width() -> f64 {
    500.0
}

fn default_canvas_height() -> f64 {
    300.0
}

fn default_todo_file() -> String {
    "todos.txt".into()
}

fn default_project_dir() -> String {
    "data/project".into()
}
