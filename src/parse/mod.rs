pub mod todo_parser;
pub mod todo_serializer;

pub use todo_parser::{ParsedFile, parse_todo_bytes, parse_todo_file, parse_todo_line};
pub use todo_serializer::{serialize_project, serialize_todo_line, serialize_todos};
