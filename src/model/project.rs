use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Project accent color keyword, stored in the `# Color:` header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectColor {
    #[default]
    Blue,
    Red,
    Green,
    Yellow,
    Orange,
    Purple,
    Brown,
    Black,
}

impl ProjectColor {
    pub const ALL: [ProjectColor; 8] = [
        ProjectColor::Blue,
        ProjectColor::Red,
        ProjectColor::Green,
        ProjectColor::Yellow,
        ProjectColor::Orange,
        ProjectColor::Purple,
        ProjectColor::Brown,
        ProjectColor::Black,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ProjectColor::Blue => "blue",
            ProjectColor::Red => "red",
            ProjectColor::Green => "green",
            ProjectColor::Yellow => "yellow",
            ProjectColor::Orange => "orange",
            ProjectColor::Purple => "purple",
            ProjectColor::Brown => "brown",
            ProjectColor::Black => "black",
        }
    }

    /// Parse a keyword leniently: unknown values fall back to blue
    pub fn from_keyword(s: &str) -> ProjectColor {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for ProjectColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for ProjectColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ProjectColor::ALL
            .into_iter()
            .find(|c| c.keyword() == s)
            .ok_or_else(|| format!("unknown color '{}'", s))
    }
}

const PROJECT_KEY: &str = "Project";
const COLOR_KEY: &str = "Color";
const CREATED_KEY: &str = "Created";
const BACKGROUND_KEY: &str = "BackgroundImage";

/// Format used for the `# Created:` header line
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The `#`-prefixed metadata block at the top of a project file.
///
/// Lines are kept verbatim so that unknown or hand-edited lines survive
/// every rewrite; the typed accessors only read and patch known keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectHeader {
    pub lines: Vec<String>,
}

impl ProjectHeader {
    /// Build the header written when a project is first created
    pub fn new(
        name: &str,
        color: ProjectColor,
        background: Option<&str>,
        created: DateTime<Local>,
    ) -> Self {
        let mut lines = vec![
            header_line(PROJECT_KEY, name),
            header_line(COLOR_KEY, color.keyword()),
            header_line(CREATED_KEY, &created.format(CREATED_FORMAT).to_string()),
        ];
        if let Some(bg) = background.filter(|b| !b.trim().is_empty()) {
            lines.push(header_line(BACKGROUND_KEY, bg.trim()));
        }
        ProjectHeader { lines }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        ProjectHeader { lines }
    }

    /// Value of a `# Key: value` line, trimmed
    pub fn field(&self, key: &str) -> Option<&str> {
        self.lines
            .iter()
            .find_map(|l| field_value(l, key))
            .map(str::trim)
    }

    /// Whether the header carries a `# Project:` line (older files don't)
    pub fn has_project_line(&self) -> bool {
        self.lines.iter().any(|l| field_value(l, PROJECT_KEY).is_some())
    }

    pub fn name(&self) -> Option<&str> {
        self.field(PROJECT_KEY)
    }

    pub fn color(&self) -> ProjectColor {
        self.field(COLOR_KEY)
            .map(ProjectColor::from_keyword)
            .unwrap_or_default()
    }

    pub fn created(&self) -> Option<&str> {
        self.field(CREATED_KEY)
    }

    pub fn background(&self) -> Option<&str> {
        self.field(BACKGROUND_KEY).filter(|b| !b.is_empty())
    }

    /// Rewrite the `# Color:` line, inserting it after `# Project:` if absent
    pub fn set_color(&mut self, color: ProjectColor) {
        let line = header_line(COLOR_KEY, color.keyword());
        if let Some(idx) = self.position(COLOR_KEY) {
            self.lines[idx] = line;
        } else if let Some(idx) = self.position(PROJECT_KEY) {
            self.lines.insert(idx + 1, line);
        } else {
            self.lines.push(line);
        }
    }

    /// Set, replace or (with `None`) remove the `# BackgroundImage:` line.
    /// A new line goes right after `# Color:`.
    pub fn set_background(&mut self, background: Option<&str>) {
        let background = background.map(str::trim).filter(|b| !b.is_empty());
        match (self.position(BACKGROUND_KEY), background) {
            (Some(idx), Some(bg)) => self.lines[idx] = header_line(BACKGROUND_KEY, bg),
            (Some(idx), None) => {
                self.lines.remove(idx);
            }
            (None, Some(bg)) => {
                let line = header_line(BACKGROUND_KEY, bg);
                match self.position(COLOR_KEY) {
                    Some(idx) => self.lines.insert(idx + 1, line),
                    None => self.lines.push(line),
                }
            }
            (None, None) => {}
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.lines.iter().position(|l| field_value(l, key).is_some())
    }
}

fn header_line(key: &str, value: &str) -> String {
    format!("# {}: {}", key, value)
}

fn field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix("# ")?
        .strip_prefix(key)?
        .strip_prefix(':')
}
