use crate::model::todo::{Todo, TodoFilter, TodoList};

/// Error type for todo operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("no todo with ID {0}")]
    NotFound(u64),
    #[error("no IDs left to assign")]
    IdsExhausted,
}

/// Normalize user-entered text into a single-line description.
/// Line breaks become spaces; surrounding whitespace is trimmed.
pub fn clean_description(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Append a new todo and return its ID
pub fn add_todo(list: &mut TodoList, description: &str) -> Result<u64, TodoError> {
    let description = clean_description(description);
    if description.is_empty() {
        return Err(TodoError::EmptyDescription);
    }
    let id = list.next_id;
    let next_id = id.checked_add(1).ok_or(TodoError::IdsExhausted)?;
    list.todos.push(Todo::new(id, description));
    list.next_id = next_id;
    Ok(id)
}

/// Mark a todo completed. Completing an already-completed todo is not an error.
pub fn mark_complete(list: &mut TodoList, id: u64) -> Result<(), TodoError> {
    let todo = find_todo_mut(list, id).ok_or(TodoError::NotFound(id))?;
    todo.completed = true;
    Ok(())
}

/// Remove a todo, returning it
pub fn delete_todo(list: &mut TodoList, id: u64) -> Result<Todo, TodoError> {
    let idx = list
        .todos
        .iter()
        .position(|t| t.id == id)
        .ok_or(TodoError::NotFound(id))?;
    Ok(list.todos.remove(idx))
}

pub fn find_todo(list: &TodoList, id: u64) -> Option<&Todo> {
    list.todos.iter().find(|t| t.id == id)
}

pub fn find_todo_mut(list: &mut TodoList, id: u64) -> Option<&mut Todo> {
    list.todos.iter_mut().find(|t| t.id == id)
}

/// Todos matching a filter, in insertion order
pub fn filtered(list: &TodoList, filter: TodoFilter) -> Vec<&Todo> {
    list.todos.iter().filter(|t| filter.matches(t)).collect()
}

/// Counts for the All / Active / Completed tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TodoStats {
    pub fn count(&self, filter: TodoFilter) -> usize {
        match filter {
            TodoFilter::All => self.total,
            TodoFilter::Active => self.active,
            TodoFilter::Completed => self.completed,
        }
    }
}

pub fn stats(list: &TodoList) -> TodoStats {
    let completed = list.todos.iter().filter(|t| t.completed).count();
    TodoStats {
        total: list.todos.len(),
        active: list.todos.len() - completed,
        completed,
    }
}
