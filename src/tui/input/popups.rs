use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Keys while a picker popup is open
pub(super) fn handle_picker(app: &mut App, key: KeyEvent) {
    let Some(picker) = app.picker.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    let len = picker.len();

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.picker = None;
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            if len > 0 {
                picker.cursor = (picker.cursor + 1) % len;
            }
        }
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            if len > 0 {
                picker.cursor = (picker.cursor + len - 1) % len;
            }
        }
        (_, KeyCode::Home) | (_, KeyCode::Char('g')) => picker.cursor = 0,
        (_, KeyCode::End) | (_, KeyCode::Char('G')) => picker.cursor = len.saturating_sub(1),
        (_, KeyCode::Enter) => {
            if len == 0 {
                app.picker = None;
                app.mode = Mode::Navigate;
            } else {
                app.confirm_picker();
            }
        }
        _ => {}
    }
}
