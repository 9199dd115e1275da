use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::paths::DataPaths;
use crate::model::{AppConfig, StorageConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over a temp data dir, with a fixed fireworks seed.
pub fn app_in(tmp: &TempDir) -> App {
    let paths = DataPaths::new(tmp.path(), &StorageConfig::default());
    let mut app = App::new(paths, AppConfig::default());
    app.fireworks_seed = Some(7);
    app
}

/// Seed the default todo file before building an App.
pub fn write_todos(tmp: &TempDir, content: &str) {
    std::fs::write(tmp.path().join("todos.txt"), content).unwrap();
}
