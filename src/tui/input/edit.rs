use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Keys while the status-row prompt is open
pub(super) fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => app.submit_input(),
        _ => {
            if let Some(input) = app.input.as_mut() {
                edit_line(&mut input.buffer, &mut input.cursor, key);
            }
        }
    }
}

/// Apply a single-line editing key to `buffer`. `cursor` is a byte offset on
/// a grapheme boundary. Returns false if the key was not an editing key.
pub(super) fn edit_line(buffer: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => *cursor = 0,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => *cursor = buffer.len(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            buffer.drain(..*cursor);
            *cursor = 0;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
            let start = unicode::word_boundary_left(buffer, *cursor);
            buffer.drain(start..*cursor);
            *cursor = start;
        }
        (KeyModifiers::ALT, KeyCode::Char('b')) | (KeyModifiers::ALT, KeyCode::Left) => {
            *cursor = unicode::word_boundary_left(buffer, *cursor);
        }
        (KeyModifiers::ALT, KeyCode::Char('f')) | (KeyModifiers::ALT, KeyCode::Right) => {
            *cursor = unicode::word_boundary_right(buffer, *cursor);
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                buffer.drain(prev..*cursor);
                *cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                buffer.drain(*cursor..next);
            }
        }
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(buffer: &mut String, cursor: &mut usize, code: KeyCode) {
        edit_line(buffer, cursor, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn insert_and_move_by_grapheme() {
        let mut buf = String::new();
        let mut cur = 0;
        for c in "caf\u{e9}!".chars() {
            press(&mut buf, &mut cur, KeyCode::Char(c));
        }
        press(&mut buf, &mut cur, KeyCode::Left);
        press(&mut buf, &mut cur, KeyCode::Backspace);
        assert_eq!(buf, "caf!");
        assert_eq!(cur, 3);
        press(&mut buf, &mut cur, KeyCode::Home);
        press(&mut buf, &mut cur, KeyCode::Delete);
        assert_eq!(buf, "af!");
    }

    #[test]
    fn ctrl_u_kills_to_start() {
        let mut buf = "hello world".to_string();
        let mut cur = 6;
        edit_line(
            &mut buf,
            &mut cur,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(buf, "world");
        assert_eq!(cur, 0);
    }

    #[test]
    fn word_motions() {
        let mut buf = "buy oat milk".to_string();
        let mut cur = buf.len();
        let alt = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT);
        edit_line(&mut buf, &mut cur, alt('b'));
        assert_eq!(cur, 8);
        edit_line(&mut buf, &mut cur, alt('b'));
        assert_eq!(cur, 4);
        edit_line(&mut buf, &mut cur, alt('f'));
        assert_eq!(cur, 8);
        edit_line(
            &mut buf,
            &mut cur,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        assert_eq!(buf, "buy milk");
        assert_eq!(cur, 4);
    }
}
