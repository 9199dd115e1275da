//! The recovery log: lines the parser skipped and file contents that could
//! not be saved.
//!
//! Each entry is a `## <timestamp> <kind>` heading, `key: value` detail
//! lines, and the affected lines indented by four spaces:
//!
//! ```text
//! ## 2025-03-01T09:05:00Z dropped-lines
//! source: /home/me/todos.txt
//!
//!     this line is not a record
//! ```

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

/// File name of the log inside the data directory
pub const RECOVERY_LOG: &str = ".tada-recovery.log";

const PREAMBLE: &str = "# tada recovery log\n\
# Lines tada could not parse and saves that failed. `tada recovery` lists them.\n\
# Safe to delete.\n\n";

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryKind {
    /// Lines skipped while loading a todo file
    DroppedLines,
    /// A rewrite that failed; the lines are what should have been written
    FailedSave,
}

impl RecoveryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecoveryKind::DroppedLines => "dropped-lines",
            RecoveryKind::FailedSave => "failed-save",
        }
    }

    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "dropped-lines" => Some(RecoveryKind::DroppedLines),
            "failed-save" => Some(RecoveryKind::FailedSave),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: RecoveryKind,
    /// The todo or project file involved
    pub source: String,
    pub error: Option<String>,
    pub lines: Vec<String>,
}

impl RecoveryEntry {
    pub fn dropped_lines(source: &Path, lines: Vec<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            kind: RecoveryKind::DroppedLines,
            source: source.display().to_string(),
            error: None,
            lines,
        }
    }

    pub fn failed_save(target: &Path, error: &io::Error, content: &str) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            kind: RecoveryKind::FailedSave,
            source: target.display().to_string(),
            error: Some(error.to_string()),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// JSON form for `tada recovery --json`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            "kind": self.kind.as_str(),
            "source": self.source,
            "error": self.error,
            "lines": self.lines,
        })
    }
}

impl fmt::Display for RecoveryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.kind.as_str()
        )?;
        writeln!(f, "source: {}", self.source)?;
        if let Some(error) = &self.error {
            writeln!(f, "error: {}", error)?;
        }
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "{}{}", INDENT, line)?;
        }
        writeln!(f)
    }
}

/// Handle on the recovery log of one data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryLog {
    path: PathBuf,
}

impl RecoveryLog {
    pub fn in_dir(dir: &Path) -> Self {
        RecoveryLog {
            path: dir.join(RECOVERY_LOG),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry. A log that can't be written is reported through
    /// tracing and otherwise ignored.
    pub fn append(&self, entry: &RecoveryEntry) {
        if let Err(e) = self.try_append(entry) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not write recovery log");
        }
    }

    fn try_append(&self, entry: &RecoveryEntry) -> io::Result<()> {
        let fresh = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut text = String::new();
        if fresh {
            text.push_str(PREAMBLE);
        }
        text.push_str(&entry.to_string());
        file.write_all(text.as_bytes())
    }

    /// Entries newest first, at most `limit` of them
    pub fn entries(&self, limit: Option<usize>) -> Vec<RecoveryEntry> {
        let Ok(text) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        let mut entries = parse_log(&text);
        entries.reverse();
        if let Some(n) = limit {
            entries.truncate(n);
        }
        entries
    }
}

fn parse_log(text: &str) -> Vec<RecoveryEntry> {
    let mut entries: Vec<RecoveryEntry> = Vec::new();
    // Headings that fail to parse leave this false so their body is skipped
    let mut in_entry = false;

    for line in text.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            in_entry = match parse_heading(heading) {
                Some((timestamp, kind)) => {
                    entries.push(RecoveryEntry {
                        timestamp,
                        kind,
                        source: String::new(),
                        error: None,
                        lines: Vec::new(),
                    });
                    true
                }
                None => false,
            };
            continue;
        }
        if !in_entry {
            continue;
        }
        let Some(entry) = entries.last_mut() else {
            continue;
        };
        if let Some(body) = line.strip_prefix(INDENT) {
            entry.lines.push(body.to_string());
        } else if let Some(source) = line.strip_prefix("source: ") {
            entry.source = source.to_string();
        } else if let Some(error) = line.strip_prefix("error: ") {
            entry.error = Some(error.to_string());
        }
    }
    entries
}

fn parse_heading(heading: &str) -> Option<(DateTime<Utc>, RecoveryKind)> {
    let (timestamp, kind) = heading.split_once(' ')?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some((timestamp.with_timezone(&Utc), RecoveryKind::from_keyword(kind.trim())?))
}
