use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

pub mod config_io;
pub mod paths;
pub mod project_io;
pub mod recovery;
pub mod state;
pub mod store;
pub mod watcher;

/// Replace `path` with `content` via a temp file in the same directory and a rename
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
