use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::atomic_write;
use crate::io::recovery::{RecoveryEntry, RecoveryLog};
use crate::model::todo::{Todo, TodoFilter, TodoList};
use crate::ops::todo_ops::{self, TodoError, TodoStats};
use crate::parse::{parse_todo_bytes, serialize_project};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Todo(#[from] TodoError),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A todo list bound to its file.
///
/// The whole file is loaded on open and rewritten after every mutation.
/// Any `#` preamble lines in the file are carried through rewrites verbatim.
#[derive(Debug)]
pub struct TodoStore {
    path: PathBuf,
    /// Where recovery entries for this file go
    recovery_dir: PathBuf,
    preamble: Vec<String>,
    list: TodoList,
    /// Set when the file exists but couldn't be read; saving would clobber it
    load_failed: bool,
}

impl TodoStore {
    /// Open the store at `path`. A missing or unreadable file is an empty store.
    /// Recovery entries go next to the file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let recovery_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::open_in(path, recovery_dir)
    }

    /// Like [`TodoStore::open`], with recovery entries written to `recovery_dir`
    pub fn open_in(path: impl Into<PathBuf>, recovery_dir: impl Into<PathBuf>) -> Self {
        let mut store = TodoStore {
            path: path.into(),
            recovery_dir: recovery_dir.into(),
            preamble: Vec::new(),
            list: TodoList::default(),
            load_failed: false,
        };
        store.reload();
        store
    }

    pub fn recovery_dir(&self) -> &Path {
        &self.recovery_dir
    }

    /// Re-read the file, replacing in-memory state.
    ///
    /// A file that exists but can't be read leaves the store empty and
    /// read-only until a later reload succeeds.
    pub fn reload(&mut self) {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) => {
                self.load_failed = e.kind() != ErrorKind::NotFound;
                if self.load_failed {
                    tracing::warn!(path = %self.path.display(), error = %e, "could not read todo file; not saving over it");
                }
                self.preamble.clear();
                self.list = TodoList::default();
                return;
            }
        };
        self.load_failed = false;

        let parsed = parse_todo_bytes(&bytes);
        if !parsed.dropped.is_empty() {
            tracing::debug!(
                path = %self.path.display(),
                count = parsed.dropped.len(),
                "skipped malformed lines"
            );
            RecoveryLog::in_dir(&self.recovery_dir)
                .append(&RecoveryEntry::dropped_lines(&self.path, parsed.dropped));
        }

        self.preamble = parsed.header;
        self.list = TodoList::from_todos(parsed.todos);
    }

    /// Rewrite the whole file from memory
    pub fn save(&self) -> Result<(), StoreError> {
        let content = serialize_project(&self.preamble, &self.list.todos);
        if self.load_failed {
            return Err(self.write_failed(
                &content,
                std::io::Error::other("file could not be read; refusing to overwrite it"),
            ));
        }
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && let Err(e) = fs::create_dir_all(dir)
        {
            return Err(self.write_failed(&content, e));
        }
        if let Err(e) = atomic_write(&self.path, content.as_bytes()) {
            return Err(self.write_failed(&content, e));
        }
        Ok(())
    }

    fn write_failed(&self, content: &str, e: std::io::Error) -> StoreError {
        tracing::error!(path = %self.path.display(), error = %e, "save failed");
        RecoveryLog::in_dir(&self.recovery_dir)
            .append(&RecoveryEntry::failed_save(&self.path, &e, content));
        StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        }
    }

    /// Add a todo and persist. Returns the new record.
    pub fn add(&mut self, description: &str) -> Result<Todo, StoreError> {
        let id = todo_ops::add_todo(&mut self.list, description)?;
        self.save()?;
        tracing::info!(id, path = %self.path.display(), "added todo");
        Ok(self.require(id)?.clone())
    }

    /// Mark a todo completed and persist. Returns the updated record.
    pub fn mark_complete(&mut self, id: u64) -> Result<Todo, StoreError> {
        todo_ops::mark_complete(&mut self.list, id)?;
        self.save()?;
        tracing::info!(id, path = %self.path.display(), "completed todo");
        Ok(self.require(id)?.clone())
    }

    /// Delete a todo and persist. Returns the removed record.
    pub fn delete(&mut self, id: u64) -> Result<Todo, StoreError> {
        let removed = todo_ops::delete_todo(&mut self.list, id)?;
        self.save()?;
        tracing::info!(id, path = %self.path.display(), "deleted todo");
        Ok(removed)
    }

    fn require(&self, id: u64) -> Result<&Todo, TodoError> {
        todo_ops::find_todo(&self.list, id).ok_or(TodoError::NotFound(id))
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        todo_ops::find_todo(&self.list, id)
    }

    /// All todos, in insertion order
    pub fn todos(&self) -> &[Todo] {
        &self.list.todos
    }

    pub fn active(&self) -> Vec<&Todo> {
        todo_ops::filtered(&self.list, TodoFilter::Active)
    }

    pub fn completed(&self) -> Vec<&Todo> {
        todo_ops::filtered(&self.list, TodoFilter::Completed)
    }

    pub fn filtered(&self, filter: TodoFilter) -> Vec<&Todo> {
        todo_ops::filtered(&self.list, filter)
    }

    pub fn stats(&self) -> TodoStats {
        todo_ops::stats(&self.list)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `#` lines that precede the records
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    /// Replace the preamble. Takes effect on the next save.
    pub fn set_preamble(&mut self, lines: Vec<String>) {
        self.preamble = lines;
    }
}
