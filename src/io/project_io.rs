use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::io::store::{StoreError, TodoStore};
use crate::model::project::{ProjectColor, ProjectHeader};
use crate::model::todo::{Todo, TodoFilter};
use crate::ops::todo_ops::TodoStats;

/// Error type for project I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("invalid project name: {0:?}")]
    InvalidName(String),
    #[error("project already exists: {0}")]
    AlreadyExists(String),
    #[error("no such project: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported image {0:?}; expected one of: {exts}", exts = IMAGE_EXTENSIONS.join(", "))]
    UnsupportedImage(PathBuf),
    #[error("could not copy {path}: {source}")]
    CopyError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Background image types a project accepts, lowercase
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// A project: a todo store whose file starts with a metadata header.
#[derive(Debug)]
pub struct ProjectStore {
    name: String,
    header: ProjectHeader,
    store: TodoStore,
}

impl ProjectStore {
    fn from_store(name: &str, store: TodoStore) -> Self {
        let header = ProjectHeader::from_lines(store.preamble().to_vec());
        ProjectStore {
            name: name.to_string(),
            header,
            store,
        }
    }

    /// The file name stem, which is how the project is addressed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as written in the header, falling back to the file name
    pub fn display_name(&self) -> &str {
        self.header.name().unwrap_or(&self.name)
    }

    pub fn color(&self) -> ProjectColor {
        self.header.color()
    }

    pub fn background(&self) -> Option<&str> {
        self.header.background()
    }

    pub fn has_background(&self) -> bool {
        self.background().is_some()
    }

    pub fn created(&self) -> Option<&str> {
        self.header.created()
    }

    pub fn header(&self) -> &ProjectHeader {
        &self.header
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Change the color and background, then persist
    pub fn set_theme(
        &mut self,
        color: ProjectColor,
        background: Option<&str>,
    ) -> Result<(), ProjectError> {
        let previous = self.header.clone();
        self.header.set_color(color);
        self.header.set_background(background);
        self.store.set_preamble(self.header.lines.clone());
        if let Err(e) = self.store.save() {
            self.store.set_preamble(previous.lines.clone());
            self.header = previous;
            return Err(e.into());
        }
        tracing::info!(project = %self.name, color = %color, "updated project theme");
        Ok(())
    }

    pub fn add(&mut self, description: &str) -> Result<Todo, StoreError> {
        self.store.add(description)
    }

    pub fn mark_complete(&mut self, id: u64) -> Result<Todo, StoreError> {
        self.store.mark_complete(id)
    }

    pub fn delete(&mut self, id: u64) -> Result<Todo, StoreError> {
        self.store.delete(id)
    }

    pub fn todos(&self) -> &[Todo] {
        self.store.todos()
    }

    pub fn active(&self) -> Vec<&Todo> {
        self.store.active()
    }

    pub fn completed(&self) -> Vec<&Todo> {
        self.store.completed()
    }

    pub fn filtered(&self, filter: TodoFilter) -> Vec<&Todo> {
        self.store.filtered(filter)
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.store.get(id)
    }

    pub fn stats(&self) -> TodoStats {
        self.store.stats()
    }

    /// Re-read the file, header included
    pub fn reload(&mut self) {
        self.store.reload();
        self.header = ProjectHeader::from_lines(self.store.preamble().to_vec());
    }

    /// The underlying store
    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TodoStore {
        &mut self.store
    }
}

/// `<dir>/<name>.txt`
pub fn project_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.txt", name))
}

/// Check a project name is usable as a file name
pub fn validate_name(name: &str) -> Result<&str, ProjectError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
        || trimmed.starts_with('.')
    {
        return Err(ProjectError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

/// Create a new project file with a fresh header.
pub fn create_project(
    dir: &Path,
    name: &str,
    color: ProjectColor,
    background: Option<&str>,
) -> Result<ProjectStore, ProjectError> {
    create_project_in(dir, name, color, background, dir)
}

/// Like [`create_project`], with recovery entries written to `recovery_dir`
pub fn create_project_in(
    dir: &Path,
    name: &str,
    color: ProjectColor,
    background: Option<&str>,
    recovery_dir: &Path,
) -> Result<ProjectStore, ProjectError> {
    let name = validate_name(name)?;
    fs::create_dir_all(dir)?;
    let path = project_path(dir, name);
    if path.exists() {
        return Err(ProjectError::AlreadyExists(name.to_string()));
    }

    let header = ProjectHeader::new(name, color, background, Local::now());
    let mut store = TodoStore::open_in(&path, recovery_dir);
    store.set_preamble(header.lines.clone());
    store.save()?;
    tracing::info!(project = name, color = %color, "created project");

    Ok(ProjectStore {
        name: name.to_string(),
        header,
        store,
    })
}

/// Names of all projects in `dir`, most recently modified first.
/// A missing directory has no projects.
pub fn list_projects(dir: &Path) -> Result<Vec<String>, ProjectError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(ProjectError::ReadError {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    };

    let mut projects: Vec<(SystemTime, String)> = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        projects.push((modified, stem.to_string()));
    }

    projects.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    Ok(projects.into_iter().map(|(_, name)| name).collect())
}

/// Copy a background image into `images_dir` and return the copy's path.
///
/// Only [`IMAGE_EXTENSIONS`] are accepted, in any case. The copy keeps the
/// source's file name and replaces an earlier import of the same name.
pub fn import_background(images_dir: &Path, source: &Path) -> Result<PathBuf, ProjectError> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let (Some(ext), Some(file_name)) = (ext, source.file_name()) else {
        return Err(ProjectError::UnsupportedImage(source.to_path_buf()));
    };
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ProjectError::UnsupportedImage(source.to_path_buf()));
    }

    let copy_error = |e: std::io::Error| ProjectError::CopyError {
        path: source.to_path_buf(),
        source: e,
    };
    fs::create_dir_all(images_dir).map_err(copy_error)?;
    let dest = images_dir.join(file_name);
    // Re-selecting an already imported image must not truncate it
    let same_file = match (source.canonicalize(), dest.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if !same_file {
        fs::copy(source, &dest).map_err(copy_error)?;
    }
    tracing::info!(source = %source.display(), dest = %dest.display(), "imported background image");
    Ok(dest)
}

fn load_project(
    dir: &Path,
    name: &str,
    recovery_dir: &Path,
) -> Result<(ProjectStore, fs::Metadata), ProjectError> {
    let name = validate_name(name)?;
    let path = project_path(dir, name);
    let meta = match fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ProjectError::NotFound(name.to_string()));
        }
        Err(e) => return Err(ProjectError::ReadError { path, source: e }),
    };
    let store = TodoStore::open_in(&path, recovery_dir);
    Ok((ProjectStore::from_store(name, store), meta))
}

/// Load a project as it is on disk. Unlike [`open_project_in`], a file
/// without a header is left alone.
pub fn read_project_in(
    dir: &Path,
    name: &str,
    recovery_dir: &Path,
) -> Result<ProjectStore, ProjectError> {
    load_project(dir, name, recovery_dir).map(|(project, _)| project)
}

/// Open an existing project, adding a default header to files without one.
pub fn open_project(dir: &Path, name: &str) -> Result<ProjectStore, ProjectError> {
    open_project_in(dir, name, dir)
}

/// Like [`open_project`], with recovery entries written to `recovery_dir`
pub fn open_project_in(
    dir: &Path,
    name: &str,
    recovery_dir: &Path,
) -> Result<ProjectStore, ProjectError> {
    let (mut project, meta) = load_project(dir, name, recovery_dir)?;
    let name = project.name.clone();
    if !project.header.has_project_line() {
        let created = meta
            .modified()
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());
        let mut lines = ProjectHeader::new(&name, ProjectColor::Blue, None, created).lines;
        lines.extend(project.header.lines.drain(..));
        project.header = ProjectHeader::from_lines(lines);
        project.store.set_preamble(project.header.lines.clone());
        match project.store.save() {
            Ok(()) => tracing::info!(project = %name, "added header to project file"),
            Err(e) => tracing::warn!(project = %name, error = %e, "could not migrate project file"),
        }
    }
    Ok(project)
}
