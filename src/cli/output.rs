use chrono::SecondsFormat;
use serde::Serialize;

use crate::io::project_io::ProjectStore;
use crate::model::Todo;
use crate::ops::todo_ops::TodoStats;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson {
    pub id: u64,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct ProjectJson {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub active: usize,
    pub completed: usize,
}

pub fn todo_to_json(todo: &Todo) -> TodoJson {
    TodoJson {
        id: todo.id,
        description: todo.description.clone(),
        completed: todo.completed,
        created_at: todo.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

pub fn project_to_json(project: &ProjectStore) -> ProjectJson {
    let stats = project.stats();
    ProjectJson {
        name: project.name().to_string(),
        color: project.color().keyword().to_string(),
        background: project.background().map(str::to_string),
        created: project.created().map(str::to_string),
        active: stats.active,
        completed: stats.completed,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One list row: `[x] 3  Buy milk  (2025-03-04 09:15)`
pub fn format_todo_line(todo: &Todo) -> String {
    format!(
        "[{}] {:<3} {}  ({})",
        todo.checkbox_char(),
        todo.id,
        todo.description,
        todo.created_at.format("%Y-%m-%d %H:%M"),
    )
}

pub fn format_todo_detail(todo: &Todo) -> Vec<String> {
    vec![
        format!("{} {}", todo.id, todo.description),
        format!(
            "status:  {}",
            if todo.completed { "completed" } else { "active" }
        ),
        format!(
            "created: {}",
            todo.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
    ]
}

pub fn format_stats(stats: &TodoStats) -> String {
    format!(
        "{} todos, {} active, {} completed",
        stats.total, stats.active, stats.completed
    )
}

pub fn format_project_line(project: &ProjectStore) -> String {
    let stats = project.stats();
    let mut line = format!(
        "{:<20} {:<7} {} active, {} done",
        project.name(),
        project.color().keyword(),
        stats.active,
        stats.completed
    );
    if let Some(bg) = project.background() {
        line.push_str(&format!("  bg: {}", bg));
    }
    line
}
