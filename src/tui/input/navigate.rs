use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::TodoFilter;
use crate::tui::app::{App, InputPurpose, InputState, Mode, View};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Tabs
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => app.switch_view(),

        // Filters
        (_, KeyCode::Char('1')) => app.set_filter(TodoFilter::All),
        (_, KeyCode::Char('2')) => app.set_filter(TodoFilter::Active),
        (_, KeyCode::Char('3')) => app.set_filter(TodoFilter::Completed),
        (_, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => app.cycle_filter(false),
        (_, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => app.cycle_filter(true),

        // Cursor
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => app.move_cursor(1),
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => app.move_cursor(-1),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => app.list_state_mut().cursor = 0,
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => {
            let len = app.visible_todos().len();
            app.list_state_mut().cursor = len.saturating_sub(1);
        }

        // Todo actions
        (_, KeyCode::Char('a')) => app.begin_input(InputState::new(InputPurpose::AddTodo)),
        (_, KeyCode::Char('x')) | (_, KeyCode::Enter) => app.complete_selected(),
        (_, KeyCode::Char('d')) | (_, KeyCode::Delete) => app.request_delete(),

        // Search
        (_, KeyCode::Char('/')) => {
            app.search_input.clear();
            app.mode = Mode::Search;
        }
        (KeyModifiers::NONE, KeyCode::Char('n')) => search_next(app, 1),
        (_, KeyCode::Char('N')) => search_next(app, -1),
        (_, KeyCode::Esc) => app.last_search = None,

        // Projects
        (_, KeyCode::Char('p')) => app.open_project_picker(),
        (_, KeyCode::Char('+')) => {
            app.view = View::Projects;
            app.begin_input(InputState::new(InputPurpose::NewProjectName));
        }
        (_, KeyCode::Char('c')) if app.view == View::Projects => app.open_color_picker(),
        (_, KeyCode::Char('b')) if app.view == View::Projects => {
            if let Some(project) = &app.project {
                let current = project.background().unwrap_or("").to_string();
                app.begin_input(InputState::with_text(InputPurpose::Background, &current));
            } else {
                app.open_project_picker();
            }
        }

        (_, KeyCode::Char('t')) => app.toggle_theme(),
        _ => {}
    }
}
