use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::model::ProjectColor;

#[derive(Parser)]
#[command(name = "tada", about = concat!("[x] tada v", env!("CARGO_PKG_VERSION"), " - plain-text todos, with fireworks"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory holding todos.txt and data/project (default: current directory)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Operate on a project instead of the main list
    #[arg(short = 'p', long = "project", global = true)]
    pub project: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List todos
    List(ListArgs),
    /// Add a todo
    Add(AddArgs),
    /// Mark a todo complete
    Done(IdArgs),
    /// Delete a todo
    Rm(IdArgs),
    /// Show one todo
    Show(IdArgs),
    /// List projects, newest first
    Projects,
    /// Create or restyle a project
    Project(ProjectCmd),
    /// View the recovery log
    Recovery(RecoveryArgs),
}

// ---------------------------------------------------------------------------
// Todo args
// ---------------------------------------------------------------------------

#[derive(Args)]
#[command(group(ArgGroup::new("filter").args(["active", "completed"])))]
pub struct ListArgs {
    /// Only todos that are not done
    #[arg(long)]
    pub active: bool,
    /// Only finished todos
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Description (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Todo ID
    pub id: u64,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project file
    New(ProjectNewArgs),
    /// Change a project's color or background image
    Theme(ProjectThemeArgs),
}

#[derive(Args)]
pub struct ProjectNewArgs {
    pub name: String,
    /// blue, red, green, yellow, orange, purple, brown or black
    #[arg(long, default_value = "blue")]
    pub color: ProjectColor,
    /// Background image (jpg, jpeg, png, gif or bmp), copied into data/themes/images
    #[arg(long)]
    pub background: Option<String>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("bg").args(["background", "clear_background"])))]
pub struct ProjectThemeArgs {
    pub name: String,
    /// New color (default: keep the current one)
    #[arg(long)]
    pub color: Option<ProjectColor>,
    /// New background image, imported like `project new --background`
    #[arg(long)]
    pub background: Option<String>,
    /// Remove the background image
    #[arg(long)]
    pub clear_background: bool,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryArgs {
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tada", "add", "Buy", "milk", "-p", "Home", "--json"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.project.as_deref(), Some("Home"));
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text, vec!["Buy", "milk"]),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn list_filters_conflict() {
        assert!(Cli::try_parse_from(["tada", "list", "--active", "--completed"]).is_err());
    }

    #[test]
    fn color_is_parsed() {
        let cli = Cli::try_parse_from(["tada", "project", "new", "Garden", "--color", "Green"])
            .unwrap();
        match cli.command {
            Some(Commands::Project(ProjectCmd {
                action: ProjectAction::New(args),
            })) => assert_eq!(args.color, ProjectColor::Green),
            _ => panic!("expected project new"),
        }
        assert!(Cli::try_parse_from(["tada", "project", "new", "X", "--color", "teal"]).is_err());
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tada", "-C", "/tmp/x"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
    }
}
