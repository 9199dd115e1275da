use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel search
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.search_input.clear();
        }

        // Execute search
        KeyCode::Enter => {
            app.mode = Mode::Navigate;
            if app.search_input.is_empty() {
                app.last_search = None;
            } else {
                app.last_search = Some(std::mem::take(&mut app.search_input));
                search_next(app, 0);
            }
        }

        _ => {
            let mut cursor = app.search_input.len();
            edit_line(&mut app.search_input, &mut cursor, key);
        }
    }
}

/// Move the cursor to the next (`dir` = 1), previous (-1), or first at-or-after
/// the cursor (0) search match, wrapping around the list.
pub(super) fn search_next(app: &mut App, dir: isize) {
    let matches = app.search_matches();
    if matches.is_empty() {
        if app.last_search.is_some() {
            app.status_message = Some("no matches".into());
        }
        return;
    }
    let cursor = app.list_state().cursor;
    let target = match dir {
        0 => matches.iter().find(|&&i| i >= cursor).or(matches.first()),
        d if d > 0 => matches.iter().find(|&&i| i > cursor).or(matches.first()),
        _ => matches.iter().rev().find(|&&i| i < cursor).or(matches.last()),
    };
    if let Some(&idx) = target {
        app.list_state_mut().cursor = idx;
    }
}
