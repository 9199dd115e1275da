use chrono::{DateTime, FixedOffset, Local, SubsecRound};
use serde::{Deserialize, Serialize};

/// A single todo record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub description: String,
    pub completed: bool,
    /// Creation time, kept with its original offset so rewrites are byte-stable
    pub created_at: DateTime<FixedOffset>,
}

impl Todo {
    /// Create a new, incomplete todo stamped with the current local time
    /// (whole seconds, matching what the file format can hold).
    pub fn new(id: u64, description: String) -> Self {
        Todo {
            id,
            description,
            completed: false,
            created_at: now(),
        }
    }

    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(&self) -> char {
        if self.completed { 'x' } else { ' ' }
    }
}

/// Current local time truncated to whole seconds
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset().trunc_subsecs(0)
}

/// An ordered list of todos plus the next ID to hand out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub todos: Vec<Todo>,
    /// Always greater than every ID in `todos`
    pub next_id: u64,
}

impl Default for TodoList {
    fn default() -> Self {
        TodoList {
            todos: Vec::new(),
            next_id: 1,
        }
    }
}

impl TodoList {
    /// Build a list from loaded records, deriving `next_id` from the highest ID seen
    pub fn from_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos
            .iter()
            .map(|t| t.id.saturating_add(1))
            .max()
            .unwrap_or(1);
        TodoList { todos, next_id }
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

/// Which slice of a list to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !todo.completed,
            TodoFilter::Completed => todo.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Active => "Active",
            TodoFilter::Completed => "Completed",
        }
    }

    pub const ALL: [TodoFilter; 3] = [TodoFilter::All, TodoFilter::Active, TodoFilter::Completed];
}
