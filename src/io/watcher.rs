use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::event::EventKind;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::paths::DataPaths;

/// A data file that changed outside this process
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DataChange {
    /// The main todo file
    Todos,
    /// `<project_dir>/<name>.txt`, created, edited or removed
    Project(String),
}

/// Map a changed path to the data file it belongs to.
/// Temp files from atomic writes and anything that isn't `.txt` are ignored.
pub fn classify(paths: &DataPaths, path: &Path) -> Option<DataChange> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    if path.file_name() == paths.todo_file.file_name() && path.parent() == paths.todo_file.parent()
    {
        return Some(DataChange::Todos);
    }
    if path.parent() == Some(paths.project_dir.as_path()) {
        let stem = name.strip_suffix(".txt")?;
        return Some(DataChange::Project(stem.to_string()));
    }
    None
}

fn resolve(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn resolved(paths: &DataPaths) -> DataPaths {
    let todo_file = match (paths.todo_file.parent(), paths.todo_file.file_name()) {
        (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => resolve(dir).join(name),
        _ => resolve(&paths.todo_file),
    };
    DataPaths {
        root: resolve(&paths.root),
        todo_file,
        project_dir: resolve(&paths.project_dir),
    }
}

/// Watches the todo file's directory and the project directory.
///
/// The project directory is created up front so projects added later in
/// the session are covered too.
pub struct DataWatcher {
    _watcher: RecommendedWatcher,
    changes: Receiver<DataChange>,
}

impl DataWatcher {
    pub fn start(paths: &DataPaths) -> Result<Self, notify::Error> {
        let (tx, changes) = mpsc::channel();
        std::fs::create_dir_all(&paths.project_dir).map_err(notify::Error::io)?;
        // notify reports absolute, symlink-free paths
        let classify_paths = resolved(paths);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let Ok(event) = res else {
                return;
            };
            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                return;
            }
            for change in event.paths.iter().filter_map(|p| classify(&classify_paths, p)) {
                // The receiver only goes away when the TUI exits
                let _ = tx.send(change);
            }
        })?;

        let todo_dir = match paths.todo_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => paths.root.as_path(),
        };
        watcher.watch(todo_dir, RecursiveMode::NonRecursive)?;
        watcher.watch(&paths.project_dir, RecursiveMode::NonRecursive)?;

        Ok(DataWatcher {
            _watcher: watcher,
            changes,
        })
    }

    /// Everything that changed since the last call, deduplicated
    pub fn drain(&self) -> BTreeSet<DataChange> {
        self.changes.try_iter().collect()
    }
}
