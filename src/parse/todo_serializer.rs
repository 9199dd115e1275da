use chrono::SecondsFormat;

use crate::model::todo::Todo;

/// Serialize one record as `id|description|completed|created_at`
pub fn serialize_todo_line(todo: &Todo) -> String {
    format!(
        "{}|{}|{}|{}",
        todo.id,
        todo.description,
        todo.completed,
        todo.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

/// Serialize a plain todo list: one record per line, newline-terminated
pub fn serialize_todos(todos: &[Todo]) -> String {
    let mut out = String::new();
    for todo in todos {
        out.push_str(&serialize_todo_line(todo));
        out.push('\n');
    }
    out
}

/// Serialize a project file: header lines verbatim, a blank separator, then records
pub fn serialize_project(header: &[String], todos: &[Todo]) -> String {
    if header.is_empty() {
        return serialize_todos(todos);
    }
    let mut out = String::new();
    for line in header {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&serialize_todos(todos));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_todo_file;
    use chrono::DateTime;

    fn todo(id: u64, description: &str, completed: bool, ts: &str) -> Todo {
        Todo {
            id,
            description: description.into(),
            completed,
            created_at: DateTime::parse_from_rfc3339(ts).unwrap(),
        }
    }

    #[test]
    fn serialize_plain_list() {
        let todos = vec![
            todo(1, "Buy milk", false, "2025-01-02T03:04:05Z"),
            todo(2, "Call mom", true, "2025-01-02T10:00:00+07:00"),
        ];
        insta::assert_snapshot!(serialize_todos(&todos), @r"
        1|Buy milk|false|2025-01-02T03:04:05Z
        2|Call mom|true|2025-01-02T10:00:00+07:00
        ");
    }

    #[test]
    fn serialize_project_keeps_header() {
        let header = vec!["# Project: Garden".to_string(), "# Color: green".to_string()];
        let todos = vec![todo(1, "Plant beans", false, "2025-01-02T03:04:05Z")];
        insta::assert_snapshot!(serialize_project(&header, &todos), @r"
        # Project: Garden
        # Color: green

        1|Plant beans|false|2025-01-02T03:04:05Z
        ");
    }

    #[test]
    fn empty_list_serializes_to_empty_string() {
        assert_eq!(serialize_todos(&[]), "");
    }

    #[test]
    fn parse_serialize_is_stable() {
        let text = "\
# Project: Garden

1|a | b|false|2025-01-02T03:04:05Z
2|c|true|2025-06-30T23:59:59-05:00
";
        let parsed = parse_todo_file(text);
        assert_eq!(serialize_project(&parsed.header, &parsed.todos), text);
    }
}
