use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::fireworks::Show;
use crate::io::config_io;
use crate::io::paths::DataPaths;
use crate::io::project_io::{self, ProjectError, ProjectStore};
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::store::{StoreError, TodoStore};
use crate::io::watcher::{DataChange, DataWatcher};
use crate::model::{AppConfig, ProjectColor, Todo, TodoFilter};
use crate::ops::search::{compile_pattern, search_todos};
use crate::ops::todo_ops::TodoStats;

use super::input;
use super::render;
use super::theme::Theme;

/// Everything the TUI needs at startup
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub config: AppConfig,
}

/// Which tab is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Todos,
    Projects,
}

impl View {
    fn key(self) -> &'static str {
        match self {
            View::Todos => "todos",
            View::Projects => "projects",
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    /// Typing into the status-row prompt
    Input,
    Confirm,
    Picker,
}

/// Cursor and filter for one tab's list
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub filter: TodoFilter,
    pub cursor: usize,
    pub scroll_offset: usize,
}

/// What the status-row prompt is collecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    AddTodo,
    NewProjectName,
    Background,
}

impl InputPurpose {
    pub fn prompt(&self) -> &'static str {
        match self {
            InputPurpose::AddTodo => "add: ",
            InputPurpose::NewProjectName => "project name: ",
            InputPurpose::Background => "background image: ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    pub purpose: InputPurpose,
    pub buffer: String,
    /// Byte offset into `buffer`
    pub cursor: usize,
}

impl InputState {
    pub fn new(purpose: InputPurpose) -> Self {
        InputState {
            purpose,
            buffer: String::new(),
            cursor: 0,
        }
    }

    pub fn with_text(purpose: InputPurpose, text: &str) -> Self {
        InputState {
            purpose,
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTodo { id: u64, description: String },
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

/// What a picker popup chooses between
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerKind {
    /// Open an existing project
    Project { names: Vec<String> },
    /// Color for a project being created
    NewProjectColor { name: String },
    /// Recolor the current project
    ProjectColor,
}

#[derive(Debug, Clone)]
pub struct PickerState {
    pub kind: PickerKind,
    pub cursor: usize,
}

impl PickerState {
    pub fn len(&self) -> usize {
        match &self.kind {
            PickerKind::Project { names } => names.len(),
            PickerKind::NewProjectColor { .. } | PickerKind::ProjectColor => ProjectColor::ALL.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            PickerKind::Project { .. } => " Open project ",
            PickerKind::NewProjectColor { .. } | PickerKind::ProjectColor => " Project color ",
        }
    }
}

/// The fireworks overlay shown after completing a todo
#[derive(Debug)]
pub struct Celebration {
    pub description: String,
    pub show: Show,
}

/// Main application state
pub struct App {
    pub paths: DataPaths,
    pub config: AppConfig,
    pub theme: Theme,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub todos: TodoStore,
    /// Project open in the Projects tab
    pub project: Option<ProjectStore>,
    /// Project names, newest first
    pub projects: Vec<String>,
    pub todo_list: ListState,
    pub project_list: ListState,
    pub show_help: bool,
    /// Search mode: current query being typed
    pub search_input: String,
    /// Last executed search pattern
    pub last_search: Option<String>,
    pub input: Option<InputState>,
    pub confirm: Option<ConfirmState>,
    pub picker: Option<PickerState>,
    /// Message for the error modal
    pub error: Option<String>,
    /// One-shot message in the status row
    pub status_message: Option<String>,
    pub celebration: Option<Celebration>,
    /// Fixed seed for the fireworks RNG (tests)
    pub fireworks_seed: Option<u64>,
}

impl App {
    pub fn new(paths: DataPaths, config: AppConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        let todos = TodoStore::open_in(&paths.todo_file, &paths.root);
        let projects = project_io::list_projects(&paths.project_dir).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not list projects");
            Vec::new()
        });

        App {
            paths,
            config,
            theme,
            view: View::Todos,
            mode: Mode::Navigate,
            should_quit: false,
            todos,
            project: None,
            projects,
            todo_list: ListState::default(),
            project_list: ListState::default(),
            show_help: false,
            search_input: String::new(),
            last_search: None,
            input: None,
            confirm: None,
            picker: None,
            error: None,
            status_message: None,
            celebration: None,
            fireworks_seed: None,
        }
    }

    pub fn list_state(&self) -> &ListState {
        match self.view {
            View::Todos => &self.todo_list,
            View::Projects => &self.project_list,
        }
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        match self.view {
            View::Todos => &mut self.todo_list,
            View::Projects => &mut self.project_list,
        }
    }

    /// The store behind the current tab, if any
    pub fn current_store(&self) -> Option<&TodoStore> {
        match self.view {
            View::Todos => Some(&self.todos),
            View::Projects => self.project.as_ref().map(|p| p.store()),
        }
    }

    fn current_store_mut(&mut self) -> Option<&mut TodoStore> {
        match self.view {
            View::Todos => Some(&mut self.todos),
            View::Projects => self.project.as_mut().map(|p| p.store_mut()),
        }
    }

    /// Todos shown in the current tab under its filter, newest first
    pub fn visible_todos(&self) -> Vec<&Todo> {
        let filter = self.list_state().filter;
        self.current_store()
            .map(|s| s.filtered(filter).into_iter().rev().collect())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> TodoStats {
        self.current_store().map(|s| s.stats()).unwrap_or_default()
    }

    pub fn cursor_todo(&self) -> Option<&Todo> {
        self.visible_todos().get(self.list_state().cursor).copied()
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_todos().len();
        let state = self.list_state_mut();
        state.cursor = state.cursor.min(len.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_todos().len();
        if len == 0 {
            return;
        }
        let state = self.list_state_mut();
        state.cursor = state.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        let state = self.list_state_mut();
        if state.filter != filter {
            state.filter = filter;
            state.cursor = 0;
            state.scroll_offset = 0;
        }
    }

    /// Step through the All / Active / Completed filters
    pub fn cycle_filter(&mut self, forward: bool) {
        let current = self.list_state().filter;
        let idx = TodoFilter::ALL.iter().position(|f| *f == current).unwrap_or(0);
        let n = TodoFilter::ALL.len();
        let next = if forward { (idx + 1) % n } else { (idx + n - 1) % n };
        self.set_filter(TodoFilter::ALL[next]);
    }

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Todos => View::Projects,
            View::Projects => View::Todos,
        };
        self.clamp_cursor();
    }

    /// Get the active search regex for highlighting.
    /// In Search mode: compiles from current input. Otherwise from last_search.
    pub fn active_search_re(&self) -> Option<Regex> {
        match self.mode {
            Mode::Search => compile_pattern(&self.search_input),
            _ => compile_pattern(self.last_search.as_deref()?),
        }
    }

    /// Indices into `visible_todos()` whose description matches the active search
    pub fn search_matches(&self) -> Vec<usize> {
        let Some(re) = self.active_search_re() else {
            return Vec::new();
        };
        let visible = self.visible_todos();
        let ids = search_todos(visible.iter().copied(), &re);
        visible
            .iter()
            .enumerate()
            .filter(|(_, t)| ids.contains(&t.id))
            .map(|(i, _)| i)
            .collect()
    }

    fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "showing error");
        self.error = Some(message);
    }

    fn report_store_error(&mut self, e: StoreError) {
        if let StoreError::WriteError { .. } = e {
            self.show_error(format!("Could not save: {}", e));
        } else {
            self.show_error(e.to_string());
        }
    }

    // --- todo actions ---

    pub fn add_todo(&mut self, text: &str) {
        let Some(store) = self.current_store_mut() else {
            self.show_error("Open a project before adding todos");
            return;
        };
        match store.add(text) {
            Ok(todo) => {
                self.status_message = Some(format!("added: {}", todo.description));
                if let Some(idx) = self.visible_todos().iter().position(|t| t.id == todo.id) {
                    self.list_state_mut().cursor = idx;
                }
            }
            Err(e) => self.report_store_error(e),
        }
        self.clamp_cursor();
    }

    /// Complete the todo under the cursor and start the celebration
    pub fn complete_selected(&mut self) {
        let Some(todo) = self.cursor_todo() else {
            return;
        };
        if todo.completed {
            self.status_message = Some(format!("already done: {}", todo.description));
            return;
        }
        let id = todo.id;
        self.complete_todo(id);
    }

    pub fn complete_todo(&mut self, id: u64) {
        let Some(store) = self.current_store_mut() else {
            return;
        };
        match store.mark_complete(id) {
            Ok(todo) => {
                self.clamp_cursor();
                self.celebrate(&todo.description);
            }
            Err(e) => self.report_store_error(e),
        }
    }

    fn celebrate(&mut self, description: &str) {
        if !self.config.fireworks.enabled {
            self.status_message = Some(format!("completed: {}", description));
            return;
        }
        let mut show = Show::celebration(&self.config.fireworks, self.fireworks_seed);
        show.start();
        self.celebration = Some(Celebration {
            description: description.to_string(),
            show,
        });
    }

    /// Dismiss the celebration overlay
    pub fn end_celebration(&mut self) {
        if let Some(mut c) = self.celebration.take() {
            c.show.stop();
        }
    }

    /// Ask before deleting the todo under the cursor
    pub fn request_delete(&mut self) {
        let Some(todo) = self.cursor_todo() else {
            return;
        };
        self.confirm = Some(ConfirmState {
            message: format!("Delete \"{}\"?", todo.description),
            action: ConfirmAction::DeleteTodo {
                id: todo.id,
                description: todo.description.clone(),
            },
        });
        self.mode = Mode::Confirm;
    }

    pub fn delete_todo(&mut self, id: u64) {
        let Some(store) = self.current_store_mut() else {
            return;
        };
        match store.delete(id) {
            Ok(todo) => self.status_message = Some(format!("deleted: {}", todo.description)),
            Err(e) => self.report_store_error(e),
        }
        self.clamp_cursor();
    }

    // --- projects ---

    pub fn refresh_projects(&mut self) {
        match project_io::list_projects(&self.paths.project_dir) {
            Ok(names) => self.projects = names,
            Err(e) => tracing::warn!(error = %e, "could not list projects"),
        }
    }

    pub fn open_project_picker(&mut self) {
        self.refresh_projects();
        let cursor = self
            .project
            .as_ref()
            .and_then(|p| self.projects.iter().position(|n| n == p.name()))
            .unwrap_or(0);
        self.picker = Some(PickerState {
            kind: PickerKind::Project {
                names: self.projects.clone(),
            },
            cursor,
        });
        self.mode = Mode::Picker;
    }

    pub fn open_color_picker(&mut self) {
        let Some(project) = &self.project else {
            self.show_error("Select a project before changing its theme");
            return;
        };
        let cursor = ProjectColor::ALL
            .iter()
            .position(|c| *c == project.color())
            .unwrap_or(0);
        self.picker = Some(PickerState {
            kind: PickerKind::ProjectColor,
            cursor,
        });
        self.mode = Mode::Picker;
    }

    pub fn open_project(&mut self, name: &str) {
        match project_io::open_project_in(&self.paths.project_dir, name, &self.paths.root) {
            Ok(project) => {
                self.project = Some(project);
                self.view = View::Projects;
                self.project_list.cursor = 0;
                self.project_list.scroll_offset = 0;
            }
            Err(ProjectError::NotFound(name)) => {
                self.show_error(format!("Project \"{}\" no longer exists", name));
                self.refresh_projects();
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    pub fn create_project(&mut self, name: &str, color: ProjectColor) {
        match project_io::create_project_in(
            &self.paths.project_dir,
            name,
            color,
            None,
            &self.paths.root,
        ) {
            Ok(project) => {
                self.status_message = Some(format!("created project: {}", project.name()));
                self.project = Some(project);
                self.view = View::Projects;
                self.project_list = ListState::default();
                self.refresh_projects();
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    pub fn set_project_color(&mut self, color: ProjectColor) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let background = project.background().map(str::to_string);
        if let Err(e) = project.set_theme(color, background.as_deref()) {
            self.show_error(e.to_string());
        }
    }

    /// Import the image at `path` as the project's background. An empty
    /// path clears it.
    pub fn set_project_background(&mut self, path: &str) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let color = project.color();
        let path = path.trim();
        let background = if path.is_empty() {
            None
        } else {
            match project_io::import_background(&self.paths.images_dir(), Path::new(path)) {
                Ok(dest) => Some(dest.display().to_string()),
                Err(e) => {
                    self.show_error(e.to_string());
                    return;
                }
            }
        };
        if let Err(e) = project.set_theme(color, background.as_deref()) {
            self.show_error(e.to_string());
        }
    }

    /// Validate and ask for a color before creating the project
    pub fn begin_project_creation(&mut self, name: &str) {
        let name = match project_io::validate_name(name) {
            Ok(n) => n.to_string(),
            Err(e) => {
                self.show_error(e.to_string());
                return;
            }
        };
        if self.projects.contains(&name) {
            self.show_error(format!("project already exists: {}", name));
            return;
        }
        self.picker = Some(PickerState {
            kind: PickerKind::NewProjectColor { name },
            cursor: 0,
        });
        self.mode = Mode::Picker;
    }

    /// Run the picker's action on the highlighted entry
    pub fn confirm_picker(&mut self) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        self.mode = Mode::Navigate;
        match picker.kind {
            PickerKind::Project { names } => {
                if let Some(name) = names.get(picker.cursor) {
                    self.open_project(name);
                }
            }
            PickerKind::NewProjectColor { name } => {
                let color = ProjectColor::ALL[picker.cursor.min(ProjectColor::ALL.len() - 1)];
                self.create_project(&name, color);
            }
            PickerKind::ProjectColor => {
                let color = ProjectColor::ALL[picker.cursor.min(ProjectColor::ALL.len() - 1)];
                self.set_project_color(color);
            }
        }
    }

    /// Handle a submitted status-row prompt
    pub fn submit_input(&mut self) {
        let Some(input) = self.input.take() else {
            return;
        };
        self.mode = Mode::Navigate;
        match input.purpose {
            InputPurpose::AddTodo => self.add_todo(&input.buffer),
            InputPurpose::NewProjectName => self.begin_project_creation(&input.buffer),
            InputPurpose::Background => self.set_project_background(&input.buffer),
        }
    }

    pub fn begin_input(&mut self, state: InputState) {
        self.input = Some(state);
        self.mode = Mode::Input;
    }

    // --- misc ---

    /// Flip between light and dark, and remember the choice
    pub fn toggle_theme(&mut self) {
        let mode = self.theme.mode.toggled();
        self.config.ui.theme = mode;
        self.theme = Theme::for_mode(mode, &self.config.ui);
        if let Err(e) = config_io::save_theme_mode(&self.paths.root, mode) {
            tracing::warn!(error = %e, "could not save theme");
            self.status_message = Some(format!("theme not saved: {}", e));
        }
    }

    /// Reload the stores whose files changed on disk
    pub fn handle_data_changes<'a>(&mut self, changes: impl IntoIterator<Item = &'a DataChange>) {
        let mut project_files_changed = false;
        for change in changes {
            match change {
                DataChange::Todos => {
                    tracing::debug!("todo file changed on disk");
                    self.todos.reload();
                }
                DataChange::Project(name) => {
                    project_files_changed = true;
                    if let Some(project) = self.project.as_mut()
                        && project.name() == name
                    {
                        tracing::debug!(project = %name, "project file changed on disk");
                        project.reload();
                    }
                }
            }
        }
        if project_files_changed {
            self.refresh_projects();
        }
        self.clamp_cursor();
    }

    /// Advance time-driven state
    pub fn tick(&mut self, dt: Duration) {
        if let Some(c) = self.celebration.as_mut() {
            c.show.advance(dt);
        }
    }
}

/// Restore UI state from .tada-state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(&app.paths.root) else {
        return;
    };

    app.todo_list.filter = state.todo_filter;
    app.project_list.filter = state.project_filter;
    if let Some(name) = &state.current_project
        && app.projects.contains(name)
        && let Ok(project) =
            project_io::open_project_in(&app.paths.project_dir, name, &app.paths.root)
    {
        app.project = Some(project);
    }
    if state.view == View::Projects.key() {
        app.view = View::Projects;
    }
    app.last_search = state.last_search;
}

/// Save UI state to .tada-state.json
pub fn save_ui_state(app: &App) {
    let state = UiState {
        view: app.view.key().to_string(),
        todo_filter: app.todo_list.filter,
        project_filter: app.project_list.filter,
        current_project: app.project.as_ref().map(|p| p.name().to_string()),
        last_search: app.last_search.clone(),
    };
    if let Err(e) = write_ui_state(&app.paths.root, &state) {
        tracing::warn!(error = %e, "could not save UI state");
    }
}

/// Run the TUI application
pub fn run(run_config: RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    let RunConfig { data_dir, config } = run_config;
    let paths = DataPaths::new(&data_dir, &config.storage);
    let terminal_config = config.terminal.clone();

    let mut app = App::new(paths, config);
    restore_ui_state(&mut app);

    let watcher = match DataWatcher::start(&app.paths) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "file watcher unavailable");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if terminal_config.alternate_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tracing::info!(data_dir = %app.paths.root.display(), "tui started");
    let result = run_event_loop(
        &mut terminal,
        &mut app,
        watcher.as_ref(),
        Duration::from_millis(terminal_config.tick_rate_ms),
        Duration::from_millis(terminal_config.animation_tick_ms),
    );

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    if terminal_config.alternate_screen {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&DataWatcher>,
    tick_rate: Duration,
    animation_tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last = Instant::now();
    loop {
        if let Some(w) = watcher {
            let changes = w.drain();
            if !changes.is_empty() {
                app.handle_data_changes(&changes);
            }
        }

        let now = Instant::now();
        app.tick(now - last);
        last = now;

        terminal.draw(|frame| render::render(frame, app))?;

        let timeout = if app.celebration.is_some() {
            animation_tick
        } else {
            tick_rate
        };
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
