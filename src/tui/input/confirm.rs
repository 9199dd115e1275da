use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (_, KeyCode::Char('y')) | (_, KeyCode::Char('Y')) => {
            let state = app.confirm.take();
            app.mode = Mode::Navigate;
            if let Some(state) = state {
                match state.action {
                    ConfirmAction::DeleteTodo { id, .. } => app.delete_todo(id),
                }
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
