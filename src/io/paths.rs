use std::path::{Path, PathBuf};

use crate::model::config::StorageConfig;

/// Resolved locations of everything tada reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// The data directory (defaults to the current directory)
    pub root: PathBuf,
    pub todo_file: PathBuf,
    pub project_dir: PathBuf,
}

impl DataPaths {
    pub fn new(root: &Path, storage: &StorageConfig) -> Self {
        DataPaths {
            root: root.to_path_buf(),
            todo_file: root.join(&storage.todo_file),
            project_dir: root.join(&storage.project_dir),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        config_path(&self.root)
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join(".tada.log")
    }

    /// Where imported background images are copied
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("data").join("themes").join("images")
    }

    /// Path of a project's file, `<project_dir>/<name>.txt`
    pub fn project_file(&self, name: &str) -> PathBuf {
        self.project_dir.join(format!("{}.txt", name))
    }
}

/// Location of config.toml inside a data directory
pub fn config_path(root: &Path) -> PathBuf {
    root.join("config.toml")
}
