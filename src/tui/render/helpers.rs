use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::App;
use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centered rectangle of a fixed size, shrunk to fit inside `area`
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

/// Word-wrap `text` to lines of at most `max` display columns.
/// Words longer than a line are truncated with `…`.
pub(super) fn wrap_text(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word = unicode::truncate_to_width(word, max);
        let needed = if current.is_empty() {
            unicode::display_width(&word)
        } else {
            unicode::display_width(&current) + 1 + unicode::display_width(&word)
        };
        if needed > max && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Bordered popup frame in the theme's background
pub(super) fn popup_block<'a>(app: &App, title: &'a str, border: Color) -> Block<'a> {
    let bg = app.theme.bg;
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(app.theme.fg_strong).bg(bg)))
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("could not save the file to disk", 12),
            vec!["could not", "save the", "file to disk"]
        );
    }

    #[test]
    fn wrap_truncates_long_words() {
        assert_eq!(wrap_text("abcdefghij", 5), vec!["abcd\u{2026}"]);
        assert!(wrap_text("   ", 5).is_empty());
    }

    #[test]
    fn fixed_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(40, 40, area), area);
    }
}
