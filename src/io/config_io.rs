use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::paths::config_path;
use crate::io::atomic_write;
use crate::model::config::{AppConfig, ThemeMode};

/// Error type for config.toml reads and writes
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn read_text(root: &Path) -> Result<String, ConfigError> {
    let path = config_path(root);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(ConfigError::ReadError { path, source: e }),
    }
}

/// Read config.toml from the data directory. A missing file gives defaults.
pub fn read_config(root: &Path) -> Result<AppConfig, ConfigError> {
    let text = read_text(root)?;
    Ok(toml::from_str(&text)?)
}

/// Read the config as a toml_edit document for format-preserving edits
pub fn read_document(root: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let text = read_text(root)?;
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_document(root: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let path = config_path(root);
    atomic_write(&path, doc.to_string().as_bytes())
        .map_err(|e| ConfigError::WriteError { path, source: e })
}

/// Set `ui.theme` in the document, creating the `[ui]` table if needed
pub fn set_theme(doc: &mut toml_edit::DocumentMut, mode: ThemeMode) {
    let ui = doc
        .entry("ui")
        .or_insert(toml_edit::Item::Table(toml_edit::Table::new()));
    if let Some(table) = ui.as_table_like_mut() {
        table.insert("theme", toml_edit::value(mode.as_str()));
    }
}

/// Persist a theme choice, leaving the rest of the file untouched
pub fn save_theme_mode(root: &Path, mode: ThemeMode) -> Result<(), ConfigError> {
    let mut doc = read_document(root)?;
    set_theme(&mut doc, mode);
    write_document(root, &doc)?;
    tracing::debug!(theme = mode.as_str(), "saved theme");
    Ok(())
}
