mod confirm;
mod edit;
mod navigate;
mod popups;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use popups::*;
#[allow(unused_imports)]
use search::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.end_celebration();
        app.should_quit = true;
        return;
    }

    // Any key dismisses the celebration
    if app.celebration.is_some() {
        app.end_celebration();
        return;
    }

    // Error modal intercepts all input
    if app.error.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q')) {
            app.error = None;
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Input => handle_input(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::Picker => handle_picker(app, key),
    }
}

/// Shift+letter arrives as either `Char('N')` or `Char('n')` with SHIFT,
/// depending on the terminal. Fold both to the uppercase char.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::paths::DataPaths;
    use crate::model::config::StorageConfig;
    use crate::model::{AppConfig, TodoFilter};
    use crate::tui::app::View;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn chr(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(app, chr(c));
        }
    }

    fn app_in(tmp: &TempDir) -> App {
        let paths = DataPaths::new(tmp.path(), &StorageConfig::default());
        let mut app = App::new(paths, AppConfig::default());
        app.fireworks_seed = Some(1);
        app
    }

    #[test]
    fn add_via_prompt() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        handle_key(&mut app, chr('a'));
        assert_eq!(app.mode, Mode::Input);
        type_str(&mut app, "Buy milkk");
        handle_key(&mut app, key(KeyCode::Backspace));
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.todos.todos().len(), 1);
        assert_eq!(app.todos.todos()[0].description, "Buy milk");
        assert_eq!(app.status_message.as_deref(), Some("added: Buy milk"));
    }

    #[test]
    fn esc_cancels_prompt() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        handle_key(&mut app, chr('a'));
        type_str(&mut app, "nope");
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.todos.todos().is_empty());
    }

    #[test]
    fn empty_add_opens_and_closes_error() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        handle_key(&mut app, chr('a'));
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.error.is_some());
        // Keys other than dismiss do nothing
        handle_key(&mut app, chr('a'));
        assert_eq!(app.mode, Mode::Navigate);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.error.is_none());
    }

    #[test]
    fn complete_then_any_key_dismisses() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.add_todo("Buy milk");
        handle_key(&mut app, chr('x'));
        assert!(app.celebration.is_some());
        assert!(app.todos.todos()[0].completed);
        handle_key(&mut app, chr('j'));
        assert!(app.celebration.is_none());
    }

    #[test]
    fn delete_confirm_yes_and_no() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.add_todo("keep");
        handle_key(&mut app, chr('d'));
        assert_eq!(app.mode, Mode::Confirm);
        handle_key(&mut app, chr('n'));
        assert_eq!(app.todos.todos().len(), 1);

        handle_key(&mut app, chr('d'));
        handle_key(&mut app, chr('y'));
        assert!(app.todos.todos().is_empty());
        assert_eq!(app.status_message.as_deref(), Some("deleted: keep"));
    }

    #[test]
    fn filter_keys() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        handle_key(&mut app, chr('2'));
        assert_eq!(app.todo_list.filter, TodoFilter::Active);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.todo_list.filter, TodoFilter::Completed);
        handle_key(&mut app, chr('1'));
        assert_eq!(app.todo_list.filter, TodoFilter::All);
    }

    #[test]
    fn tab_switches_view() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.view, View::Projects);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.view, View::Todos);
    }

    #[test]
    fn search_and_cycle() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        for d in ["milk", "bread", "more milk", "eggs"] {
            app.add_todo(d);
        }
        app.todo_list.cursor = 0;
        handle_key(&mut app, chr('/'));
        type_str(&mut app, "milk");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.last_search.as_deref(), Some("milk"));
        // Shown newest first: eggs, more milk, bread, milk
        assert_eq!(app.todo_list.cursor, 1);

        handle_key(&mut app, chr('n'));
        assert_eq!(app.todo_list.cursor, 3);
        handle_key(&mut app, chr('n'));
        assert_eq!(app.todo_list.cursor, 1);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('n'), KeyModifiers::SHIFT));
        assert_eq!(app.todo_list.cursor, 3);
    }

    #[test]
    fn new_project_flow() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, chr('+'));
        type_str(&mut app, "Garden");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Picker);
        handle_key(&mut app, chr('j'));
        handle_key(&mut app, key(KeyCode::Enter));

        let project = app.project.as_ref().unwrap();
        assert_eq!(project.name(), "Garden");
        assert_eq!(project.color(), crate::model::ProjectColor::Red);
    }

    #[test]
    fn help_toggle_and_quit() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        handle_key(&mut app, chr('?'));
        assert!(app.show_help);
        handle_key(&mut app, chr('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
        handle_key(&mut app, chr('q'));
        assert!(app.should_quit);
    }
}
