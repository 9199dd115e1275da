use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tada::io::project_io;
use tada::io::recovery::{RecoveryKind, RecoveryLog};
use tada::io::store::TodoStore;
use tada::parse::{parse_todo_file, serialize_project, serialize_todos};
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", name, e))
}

/// Copy a fixture into `dir` under `file_name` and return its path
fn install_fixture(dir: &Path, name: &str, file_name: &str) -> PathBuf {
    let dest = dir.join(file_name);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::copy(fixture_path(name), &dest).unwrap();
    dest
}

#[test]
fn todo_file_round_trips_byte_for_byte() {
    let source = read_fixture("todos.txt");
    let parsed = parse_todo_file(&source);
    assert!(parsed.dropped.is_empty());
    assert_eq!(parsed.todos.len(), 4);
    assert_eq!(parsed.todos[2].description, "Fix a|b|c parsing");
    assert_eq!(serialize_todos(&parsed.todos), source);
}

#[test]
fn project_file_round_trips_byte_for_byte() {
    let source = read_fixture("project.txt");
    let parsed = parse_todo_file(&source);
    assert_eq!(parsed.header.len(), 4);
    assert_eq!(serialize_project(&parsed.header, &parsed.todos), source);
}

#[test]
fn store_rewrite_keeps_existing_records() {
    let tmp = TempDir::new().unwrap();
    let path = install_fixture(tmp.path(), "todos.txt", "todos.txt");

    let mut store = TodoStore::open_in(&path, tmp.path());
    let added = store.add("Water plants").unwrap();
    assert_eq!(added.id, 8);

    let content = fs::read_to_string(&path).unwrap();
    let original = read_fixture("todos.txt");
    assert!(content.starts_with(&original));
    assert!(content.lines().last().unwrap().starts_with("8|Water plants|false|"));
    assert_eq!(content.lines().count(), 5);

    let reloaded = TodoStore::open_in(&path, tmp.path());
    assert_eq!(reloaded.todos(), store.todos());
}

#[test]
fn project_store_round_trip() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("data/project");
    install_fixture(&dir, "project.txt", "Garden.txt");

    let mut project = project_io::open_project_in(&dir, "Garden", tmp.path()).unwrap();
    assert_eq!(project.color().keyword(), "green");
    assert_eq!(project.background(), Some("/home/me/pictures/leaves.png"));

    project.mark_complete(1).unwrap();
    let content = fs::read_to_string(dir.join("Garden.txt")).unwrap();
    let expected = read_fixture("project.txt").replace("Plant beans|false", "Plant beans|true");
    assert_eq!(content, expected);
}

#[test]
fn messy_file_loads_what_it_can() {
    let tmp = TempDir::new().unwrap();
    let path = install_fixture(tmp.path(), "messy.txt", "todos.txt");

    let mut store = TodoStore::open_in(&path, tmp.path());
    assert_eq!(store.todos().len(), 2);
    assert_eq!(store.todos()[1].description, "Walk dog");

    let entries = RecoveryLog::in_dir(tmp.path()).entries(None);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, RecoveryKind::DroppedLines);
    assert_eq!(
        entries[0].lines,
        vec![
            "this line is not a record",
            "abc|bad id|false|2025-01-02T03:04:05Z"
        ]
    );

    // The next save writes a clean file
    store.delete(1).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("2|Walk dog|true|"));
}
