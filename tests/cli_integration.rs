//! Integration tests for the `tada` CLI.
//!
//! Each test runs `tada -C <tempdir>` as a subprocess and checks stdout,
//! stderr, and the files left behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Path to the built `tada` binary
fn tada_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // test binary
    path.pop(); // deps/
    path.push("tada");
    path
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(tada_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("TADA_LOG")
        .output()
        .expect("failed to run tada")
}

/// Run and require success, returning stdout
fn run_ok(dir: &Path, args: &[&str]) -> String {
    let out = run(dir, args);
    assert!(
        out.status.success(),
        "tada {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).unwrap()
}

fn json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    serde_json::from_str(&run_ok(dir, &full)).unwrap()
}

#[test]
fn add_list_done_rm() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    assert_eq!(run_ok(dir, &["add", "Buy", "milk"]), "added 1: Buy milk\n");
    assert_eq!(run_ok(dir, &["add", "Walk dog"]), "added 2: Walk dog\n");

    let listing = run_ok(dir, &["list"]);
    assert!(listing.contains("[ ] 1   Buy milk  ("));
    assert!(listing.ends_with("2 todos, 2 active, 0 completed\n"));

    assert_eq!(run_ok(dir, &["done", "1"]), "completed 1: Buy milk\n");
    let active = run_ok(dir, &["list", "--active"]);
    assert!(!active.contains("Buy milk"));
    assert!(active.contains("Walk dog"));
    assert!(run_ok(dir, &["list", "--completed"]).contains("[x] 1   Buy milk"));

    assert_eq!(run_ok(dir, &["rm", "2"]), "deleted 2: Walk dog\n");
    let content = fs::read_to_string(dir.join("todos.txt")).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("1|Buy milk|true|"));
}

#[test]
fn next_id_follows_highest_record() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    run_ok(dir, &["add", "one"]);
    run_ok(dir, &["add", "two"]);
    run_ok(dir, &["rm", "1"]);
    assert_eq!(run_ok(dir, &["add", "three"]), "added 3: three\n");
}

#[test]
fn empty_list() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(run_ok(tmp.path(), &["list"]), "no todos\n");
    assert_eq!(run_ok(tmp.path(), &["projects"]), "no projects\n");
}

#[test]
fn show_and_json_output() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(
        dir.join("todos.txt"),
        "4|Fix a|b parsing|false|2025-02-10T08:30:00Z\n",
    )
    .unwrap();

    let shown = run_ok(dir, &["show", "4"]);
    assert_eq!(
        shown,
        "4 Fix a|b parsing\nstatus:  active\ncreated: 2025-02-10T08:30:00Z\n"
    );

    let item = json(dir, &["show", "4"]);
    assert_eq!(item["id"], 4);
    assert_eq!(item["description"], "Fix a|b parsing");
    assert_eq!(item["completed"], false);
    assert_eq!(item["created_at"], "2025-02-10T08:30:00Z");

    let added = json(dir, &["add", "Next one"]);
    assert_eq!(added["id"], 5);

    let list = json(dir, &["list"]);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[test]
fn missing_id_fails() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["done", "9"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: no todo with ID 9"), "{}", stderr);

    let out = run(tmp.path(), &["show", "9"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("todo not found: 9"));
}

#[test]
fn projects_flow() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    assert_eq!(
        run_ok(dir, &["project", "new", "Garden", "--color", "green"]),
        "created project Garden (green)\n"
    );
    let file = dir.join("data/project/Garden.txt");
    let header = fs::read_to_string(&file).unwrap();
    assert!(header.starts_with("# Project: Garden\n# Color: green\n"));

    run_ok(dir, &["-p", "Garden", "add", "Plant beans"]);
    run_ok(dir, &["-p", "Garden", "add", "Buy compost"]);
    run_ok(dir, &["-p", "Garden", "done", "2"]);

    // The main list is untouched
    assert_eq!(run_ok(dir, &["list"]), "no todos\n");

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("# Color: green"));
    assert!(content.contains("1|Plant beans|false|"));
    assert!(content.contains("2|Buy compost|true|"));

    let projects = json(dir, &["projects"]);
    assert_eq!(projects[0]["name"], "Garden");
    assert_eq!(projects[0]["active"], 1);
    assert_eq!(projects[0]["completed"], 1);

    let image = dir.join("leaves.png");
    fs::write(&image, "png").unwrap();
    run_ok(
        dir,
        &["project", "theme", "Garden", "--background", image.to_str().unwrap()],
    );
    let imported = dir.join("data/themes/images/leaves.png");
    assert_eq!(fs::read_to_string(&imported).unwrap(), "png");
    let themed = json(dir, &["projects"]);
    assert_eq!(themed[0]["color"], "green");
    assert_eq!(themed[0]["background"], imported.to_str().unwrap());

    let out = run(dir, &["project", "theme", "Garden", "--background", "notes.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported image"));

    run_ok(dir, &["project", "theme", "Garden", "--clear-background"]);
    let cleared = fs::read_to_string(&file).unwrap();
    assert!(!cleared.contains("leaves.png"));
    assert!(cleared.contains("2|Buy compost|true|"));
}

#[test]
fn unknown_project_fails() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["-p", "Nowhere", "list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}

#[test]
fn recovery_log() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    assert_eq!(run_ok(dir, &["recovery"]), "recovery log is empty\n");

    fs::write(
        dir.join("todos.txt"),
        "1|Buy milk|false|2025-01-02T03:04:05Z\nnot a record\n",
    )
    .unwrap();
    run_ok(dir, &["list"]);

    let entries = json(dir, &["recovery", "--limit", "5"]);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].to_string().contains("not a record"));
}
