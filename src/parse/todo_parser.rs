use chrono::DateTime;

use crate::model::todo::{Todo, now};

/// Result of parsing a todo or project file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    /// `#`-prefixed lines, in file order
    pub header: Vec<String>,
    /// Records that parsed cleanly
    pub todos: Vec<Todo>,
    /// Non-blank lines that were neither header nor a valid record
    pub dropped: Vec<String>,
}

/// Parse the full text of a todo file.
///
/// Blank lines are ignored, `#` lines are collected as header, and lines
/// that don't form a record are returned in `dropped` rather than failing
/// the whole load.
pub fn parse_todo_file(text: &str) -> ParsedFile {
    let mut parsed = ParsedFile::default();
    for raw in text.lines() {
        parsed.push_line(raw);
    }
    parsed
}

/// Parse a todo file as raw bytes, decoding each line on its own.
///
/// A line that isn't valid UTF-8 is dropped (lossily decoded, so it can
/// still be logged) without affecting the lines around it.
pub fn parse_todo_bytes(bytes: &[u8]) -> ParsedFile {
    let mut parsed = ParsedFile::default();
    for raw in bytes.split(|&b| b == b'\n') {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) => parsed.push_line(line),
            Err(_) => parsed
                .dropped
                .push(String::from_utf8_lossy(raw).into_owned()),
        }
    }
    parsed
}

impl ParsedFile {
    fn push_line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        if line.starts_with('#') {
            self.header.push(line.to_string());
            return;
        }
        match parse_todo_line(line) {
            Some(todo) => self.todos.push(todo),
            None => self.dropped.push(raw.to_string()),
        }
    }
}

/// Parse one `id|description|completed|created_at` record.
///
/// The ID is taken from the left and the flag and timestamp from the right,
/// so a description may itself contain `|`. An unparseable timestamp falls
/// back to the current time. `u64::MAX` is not a usable ID: nothing could
/// follow it.
pub fn parse_todo_line(line: &str) -> Option<Todo> {
    let (id, rest) = line.split_once('|')?;
    let id: u64 = id.trim().parse().ok()?;
    if id == u64::MAX {
        return None;
    }

    let mut tail = rest.rsplitn(3, '|');
    let created_at = tail.next()?;
    let completed = tail.next()?;
    let description = tail.next()?;

    let created_at = DateTime::parse_from_rfc3339(created_at.trim()).unwrap_or_else(|_| now());

    Some(Todo {
        id,
        description: description.to_string(),
        completed: completed.trim() == "true",
        created_at,
    })
}
