use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::paths::DataPaths;
use crate::io::project_io::{self, ProjectStore};
use crate::io::recovery::RecoveryLog;
use crate::io::store::TodoStore;
use crate::model::{Todo, TodoFilter};

/// Entries shown by `tada recovery` without `--limit`
const DEFAULT_RECOVERY_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let root = data_root(cli.data_dir.as_deref())?;
    let config = config_io::read_config(&root)?;
    let paths = DataPaths::new(&root, &config.storage);
    let project = cli.project.as_deref();

    match cli.command {
        None => Err("no subcommand given (run `tada` without arguments for the TUI)".into()),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&paths, project, args, json),
            Commands::Show(args) => cmd_show(&paths, project, args, json),
            Commands::Projects => cmd_projects(&paths, json),
            Commands::Recovery(args) => cmd_recovery(&paths, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&paths, project, args, json),
            Commands::Done(args) => cmd_done(&paths, project, args, json),
            Commands::Rm(args) => cmd_rm(&paths, project, args, json),
            Commands::Project(cmd) => match cmd.action {
                ProjectAction::New(args) => cmd_project_new(&paths, args, json),
                ProjectAction::Theme(args) => cmd_project_theme(&paths, args, json),
            },
        },
    }
}

/// Resolve the data directory from `-C`, falling back to the working directory
pub fn data_root(dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match dir {
        Some(d) => Ok(PathBuf::from(d)),
        None => Ok(std::env::current_dir()
            .map_err(|e| format!("cannot read current directory: {}", e))?),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The list a command operates on: the main todo file or one project
enum Target {
    Main(TodoStore),
    Project(ProjectStore),
}

impl Target {
    fn open(paths: &DataPaths, project: Option<&str>) -> Result<Self, project_io::ProjectError> {
        match project {
            None => Ok(Target::Main(TodoStore::open_in(&paths.todo_file, &paths.root))),
            Some(name) => Ok(Target::Project(project_io::open_project_in(
                &paths.project_dir,
                name,
                &paths.root,
            )?)),
        }
    }

    fn store(&self) -> &TodoStore {
        match self {
            Target::Main(s) => s,
            Target::Project(p) => p.store(),
        }
    }

    fn store_mut(&mut self) -> &mut TodoStore {
        match self {
            Target::Main(s) => s,
            Target::Project(p) => p.store_mut(),
        }
    }
}

fn print_todo(todo: &Todo, verb: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&todo_to_json(todo))?);
    } else {
        println!("{} {}: {}", verb, todo.id, todo.description);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    paths: &DataPaths,
    project: Option<&str>,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = Target::open(paths, project)?;
    let filter = if args.active {
        TodoFilter::Active
    } else if args.completed {
        TodoFilter::Completed
    } else {
        TodoFilter::All
    };
    let todos = target.store().filtered(filter);

    if json {
        let items: Vec<TodoJson> = todos.iter().map(|t| todo_to_json(t)).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for todo in &todos {
            println!("{}", format_todo_line(todo));
        }
        if todos.is_empty() {
            println!("no todos");
        } else if filter == TodoFilter::All {
            println!("{}", format_stats(&target.store().stats()));
        }
    }
    Ok(())
}

fn cmd_show(
    paths: &DataPaths,
    project: Option<&str>,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = Target::open(paths, project)?;
    let todo = target
        .store()
        .get(args.id)
        .ok_or_else(|| format!("todo not found: {}", args.id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&todo_to_json(todo))?);
    } else {
        for line in format_todo_detail(todo) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_projects(paths: &DataPaths, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let names = project_io::list_projects(&paths.project_dir)?;
    let mut projects = Vec::new();
    for name in &names {
        match project_io::read_project_in(&paths.project_dir, name, &paths.root) {
            Ok(p) => projects.push(p),
            Err(e) => tracing::warn!(project = %name, error = %e, "skipping unreadable project"),
        }
    }

    if json {
        let items: Vec<ProjectJson> = projects.iter().map(project_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if projects.is_empty() {
        println!("no projects");
    } else {
        for project in &projects {
            println!("{}", format_project_line(project));
        }
    }
    Ok(())
}

fn cmd_recovery(
    paths: &DataPaths,
    args: RecoveryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = args.limit.unwrap_or(DEFAULT_RECOVERY_LIMIT);
    let entries = RecoveryLog::in_dir(&paths.root).entries(Some(limit));

    if json {
        let items: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if entries.is_empty() {
        println!("recovery log is empty");
    } else {
        for entry in &entries {
            print!("{}", entry);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    paths: &DataPaths,
    project: Option<&str>,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut target = Target::open(paths, project)?;
    let todo = target.store_mut().add(&args.text.join(" "))?;
    print_todo(&todo, "added", json)
}

fn cmd_done(
    paths: &DataPaths,
    project: Option<&str>,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut target = Target::open(paths, project)?;
    let todo = target.store_mut().mark_complete(args.id)?;
    print_todo(&todo, "completed", json)
}

fn cmd_rm(
    paths: &DataPaths,
    project: Option<&str>,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut target = Target::open(paths, project)?;
    let todo = target.store_mut().delete(args.id)?;
    print_todo(&todo, "deleted", json)
}

fn cmd_project_new(
    paths: &DataPaths,
    args: ProjectNewArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let background = match &args.background {
        Some(source) => Some(project_io::import_background(
            &paths.images_dir(),
            Path::new(source),
        )?),
        None => None,
    };
    let background = background.map(|p| p.display().to_string());
    let project = project_io::create_project_in(
        &paths.project_dir,
        &args.name,
        args.color,
        background.as_deref(),
        &paths.root,
    )?;
    print_project(&project, "created project", json)
}

fn cmd_project_theme(
    paths: &DataPaths,
    args: ProjectThemeArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut project = project_io::open_project_in(&paths.project_dir, &args.name, &paths.root)?;
    let color = args.color.unwrap_or(project.color());
    let background = if args.clear_background {
        None
    } else if let Some(source) = &args.background {
        let dest = project_io::import_background(&paths.images_dir(), Path::new(source))?;
        Some(dest.display().to_string())
    } else {
        project.background().map(str::to_string)
    };
    project.set_theme(color, background.as_deref())?;
    print_project(&project, "updated project", json)
}

fn print_project(
    project: &ProjectStore,
    verb: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&project_to_json(project))?);
    } else {
        println!("{} {} ({})", verb, project.name(), project.color());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectColor, StorageConfig};
    use std::path::Path;
    use tempfile::TempDir;

    fn paths(tmp: &TempDir) -> DataPaths {
        DataPaths::new(tmp.path(), &StorageConfig::default())
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn add_then_done_then_rm() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        cmd_add(&paths, None, AddArgs { text: vec!["Buy".into(), "milk".into()] }, false).unwrap();
        assert!(read(&paths.todo_file).contains("1|Buy milk|false|"));

        cmd_done(&paths, None, IdArgs { id: 1 }, true).unwrap();
        assert!(read(&paths.todo_file).contains("1|Buy milk|true|"));

        cmd_rm(&paths, None, IdArgs { id: 1 }, false).unwrap();
        assert_eq!(read(&paths.todo_file), "");
    }

    #[test]
    fn missing_id_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let err = cmd_done(&paths, None, IdArgs { id: 9 }, false).unwrap_err();
        assert_eq!(err.to_string(), "no todo with ID 9");
        assert!(cmd_show(&paths, None, IdArgs { id: 9 }, false).is_err());
    }

    #[test]
    fn project_target() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        cmd_project_new(
            &paths,
            ProjectNewArgs {
                name: "Garden".into(),
                color: ProjectColor::Green,
                background: None,
            },
            false,
        )
        .unwrap();
        cmd_add(&paths, Some("Garden"), AddArgs { text: vec!["Plant beans".into()] }, false)
            .unwrap();

        let content = read(&paths.project_file("Garden"));
        assert!(content.starts_with("# Project: Garden\n"));
        assert!(content.contains("1|Plant beans|false|"));
        assert!(!paths.todo_file.exists());

        assert!(cmd_list(&paths, Some("Nope"), ListArgs { active: false, completed: false }, false).is_err());
    }

    #[test]
    fn theme_keeps_unset_fields() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let image = tmp.path().join("desk.png");
        std::fs::write(&image, "png").unwrap();
        cmd_project_new(
            &paths,
            ProjectNewArgs {
                name: "Work".into(),
                color: ProjectColor::Red,
                background: Some(image.display().to_string()),
            },
            false,
        )
        .unwrap();
        let imported = paths.images_dir().join("desk.png").display().to_string();
        let project = project_io::open_project(&paths.project_dir, "Work").unwrap();
        assert_eq!(project.background(), Some(imported.as_str()));

        cmd_project_theme(
            &paths,
            ProjectThemeArgs {
                name: "Work".into(),
                color: Some(ProjectColor::Purple),
                background: None,
                clear_background: false,
            },
            false,
        )
        .unwrap();
        let project = project_io::open_project(&paths.project_dir, "Work").unwrap();
        assert_eq!(project.color(), ProjectColor::Purple);
        assert_eq!(project.background(), Some(imported.as_str()));

        cmd_project_theme(
            &paths,
            ProjectThemeArgs {
                name: "Work".into(),
                color: None,
                background: None,
                clear_background: true,
            },
            false,
        )
        .unwrap();
        let project = project_io::open_project(&paths.project_dir, "Work").unwrap();
        assert_eq!(project.color(), ProjectColor::Purple);
        assert!(!project.has_background());
    }

    #[test]
    fn background_must_be_an_image() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let notes = tmp.path().join("notes.txt");
        std::fs::write(&notes, "x").unwrap();

        let err = cmd_project_new(
            &paths,
            ProjectNewArgs {
                name: "Work".into(),
                color: ProjectColor::Red,
                background: Some(notes.display().to_string()),
            },
            false,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("unsupported image"));
        assert!(!paths.project_file("Work").exists());
        assert!(!paths.images_dir().exists());
    }

    #[test]
    fn theme_imports_new_background() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        project_io::create_project(&paths.project_dir, "Work", ProjectColor::Red, None).unwrap();
        let image = tmp.path().join("sky.JPG");
        std::fs::write(&image, "jpeg").unwrap();

        cmd_project_theme(
            &paths,
            ProjectThemeArgs {
                name: "Work".into(),
                color: None,
                background: Some(image.display().to_string()),
                clear_background: false,
            },
            false,
        )
        .unwrap();
        let dest = paths.images_dir().join("sky.JPG");
        assert_eq!(read(&dest), "jpeg");
        let project = project_io::open_project(&paths.project_dir, "Work").unwrap();
        assert_eq!(project.background(), Some(dest.display().to_string().as_str()));
    }

    #[test]
    fn listing_projects_does_not_rewrite_files() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        std::fs::create_dir_all(&paths.project_dir).unwrap();
        let legacy = "1|old task|false|2025-01-02T03:04:05Z\n";
        std::fs::write(paths.project_file("Old"), legacy).unwrap();

        cmd_projects(&paths, true).unwrap();
        assert_eq!(read(&paths.project_file("Old")), legacy);
    }
}
